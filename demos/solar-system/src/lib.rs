use wasm_bindgen::prelude::*;

mod scenes;

orrery_web::export_scene!("solar-system", scenes::manifest);
