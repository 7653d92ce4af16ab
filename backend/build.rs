use std::fs;
use std::path::Path;

fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    // The WASM bundle is embedded at compile time; an empty static/ keeps
    // include_dir! happy when the frontend has not been built yet.
    let _ = fs::create_dir_all(out_dir.join("dist"));
    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).unwrap();
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new()
                .overwrite(true)
                .copy_inside(true),
        )
        .unwrap();
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
