use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=config.toml");

    // OUT_DIR is target/<profile>/build/<pkg>/out; the binary sits three levels up
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let Some(target_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        return;
    };

    // Copy config.toml next to the viewer binary
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        fs::copy(config_path, target_dir.join("config.toml")).expect("copy config.toml");
    }
}
