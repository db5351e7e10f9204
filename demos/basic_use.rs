use media_inspector::MediaInspector;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let photo = "file:assets/sunset.jpg";
    let inspector = MediaInspector::builder().build();

    println!("{}", inspector.picture_date(photo).await);
    println!("{}", inspector.camera_hardware(photo).await);
    println!(
        "{} | {} | {}",
        inspector.f_stop(photo).await,
        inspector.exposure(photo).await,
        inspector.iso_speed(photo).await
    );

    let result = inspector.inspect(photo).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
