use media_inspector::utils::list_files_walkdir_filtered;
use media_inspector::{InspectResult, MediaInspector};
use std::path::PathBuf;

/// Print a one-line summary of every photo and video in a folder.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let start_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(dirs::picture_dir)
        .ok_or_else(|| color_eyre::eyre::eyre!("usage: inspect_folder <DIR>"))?;

    let inspector = MediaInspector::builder().build();
    let all_files = list_files_walkdir_filtered(&start_dir, false)?;
    println!("Found {} total files.", all_files.len());

    for file in all_files {
        let Ok(result) = inspector.inspect_path(&file).await else {
            continue;
        };
        match result {
            InspectResult::Image(image) => println!(
                "{}\t{}\t{}\t{}",
                file.display(),
                image.hardware,
                image.f_stop,
                image.exposure
            ),
            InspectResult::Video(video) => println!(
                "{}\t{}\t{}",
                file.display(),
                video.dimensions,
                video.codec_id
            ),
        }
    }

    Ok(())
}
