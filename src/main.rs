use rasterkit::engine::Image;
use rasterkit::logger;

use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init();

    info!("Starting rasterkit...");

    let mut image = match Image::open("input.ppm") {
        Ok(image) => image,
        Err(e) => {
            error!("Cannot load input.ppm: {e}");
            return Ok(());
        }
    };

    info!(
        width = image.width(),
        height = image.height(),
        depth = ?image.depth(),
        color_space = ?image.color_space(),
        "image loaded"
    );

    image.gaussian_blur(1)?;
    image.contrast(10.0)?;
    image.stretch_contrast(10.0, 240.0)?;

    match image.save("output.ppm") {
        Ok(_) => info!("Wrote output.ppm"),
        Err(e) => error!("Saving failed: {e}"),
    }

    Ok(())
}
