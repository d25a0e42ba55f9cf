use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=../frontend/dist");

    let dist_dir = Path::new("../frontend/dist");
    let embed_dir = Path::new("static");
    if !dist_dir.join("index.html").exists() {
        // Keep the checked-in placeholder page.
        return Ok(());
    }

    if embed_dir.exists() {
        fs::remove_dir_all(embed_dir)?;
    }
    fs::create_dir_all(embed_dir)?;
    let options = fs_extra::dir::CopyOptions::new().overwrite(true);
    fs_extra::dir::copy(dist_dir, embed_dir, &options)?;
    Ok(())
}
