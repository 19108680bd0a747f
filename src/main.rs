use clap::Parser;

use boxgaze::ascii;
use boxgaze::boxapi::{self, BoxClient};
use boxgaze::cli::Args;
use boxgaze::config::ConfigFile;

/// Load .env file before anything else so BOXGAZE_CONFIG can come from it.
fn load_env() {
    let _ = dotenv::dotenv();
}

fn main() {
    load_env();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let config = ConfigFile::load(args.config.as_deref()).map_err(|e| e.to_string())?;
    let credentials = config.into_credentials();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start async runtime: {}", e))?;

    rt.block_on(async {
        let mut client = BoxClient::new(credentials).map_err(|e| e.to_string())?;
        let mut rng = rand::thread_rng();

        client
            .authenticate(&mut rng)
            .await
            .map_err(|e| e.to_string())?;

        let images = client
            .list_images(&args.folder)
            .await
            .map_err(|e| e.to_string())?;
        let picked = boxapi::pick_random(&images, &mut rng).map_err(|e| e.to_string())?;
        log::info!("selected '{}' out of {} image(s)", picked.name, images.len());

        let bytes = client
            .download_file(&picked.id)
            .await
            .map_err(|e| e.to_string())?;

        let grid = ascii::decode_and_resize(&bytes, args.width).map_err(|e| e.to_string())?;
        print!("{}", ascii::render(&grid));

        Ok(())
    })
}
