use std::fs;
use std::path::Path;

fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

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

    // The server embeds static/dist at compile time, so the directory must
    // exist even when the frontend has not been built yet.
    let embedded = out_dir.join("dist");
    if !embedded.exists() {
        fs::create_dir_all(&embedded).unwrap();
        fs::write(
            embedded.join("index.html"),
            "<!doctype html><html><body><p>Frontend bundle not built. Run `trunk build` in frontend/.</p></body></html>\n",
        )
        .unwrap();
    }

    println!("cargo:rerun-if-changed=../frontend/dist");
}
