//! Catalog Sync
//!
//! Maintenance CLI for product images: uploads a directory of photos to Cloudinary
//! under stable per-product public ids, then writes the resulting URLs into the
//! MongoDB detail documents. Full detail documents (attributes and reviews)
//! can be seeded from a JSON file.

use clap::{Parser, Subcommand};
use core_config::cloudinary::CloudinaryConfig;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::mongodb::MongoConfig;
use domain_products::{CloudinaryImageStore, MongoDetailRepository};
use eyre::Result;
use std::path::PathBuf;
use tracing::info;

mod mapping;
mod sync;

use mapping::ImageMapping;

#[derive(Parser)]
#[command(name = "catalog-sync")]
#[command(about = "Upload product images and attach them to product detail documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload mapped image files to Cloudinary as product_{id}
    UploadImages {
        /// Directory holding the image files
        #[arg(short, long, default_value = "Product_Images")]
        dir: PathBuf,

        /// JSON object mapping file names to product ids
        #[arg(short, long)]
        mapping: PathBuf,

        /// Where to write the uploaded URLs
        #[arg(short, long, default_value = "uploaded-images.json")]
        output: PathBuf,
    },

    /// Set each uploaded product's detail images to its uploaded URL
    AssignImages {
        /// Results file written by upload-images
        #[arg(short, long, default_value = "uploaded-images.json")]
        input: PathBuf,
    },

    /// Upsert complete detail documents from a JSON array
    SeedDetails {
        /// Detail documents (MaHangHoa, MoTaChiTiet, ThongTinMoRong, DanhGia, HinhAnh)
        #[arg(short, long)]
        input: PathBuf,

        /// Results file of upload-images; fills documents that list no images
        #[arg(long)]
        images: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();

    match cli.command {
        Commands::UploadImages {
            dir,
            mapping: mapping_file,
            output,
        } => {
            let cloudinary = CloudinaryConfig::from_env()?;
            if !cloudinary.is_configured() {
                eyre::bail!("Cloudinary credentials are not set (CLOUDINARY_CLOUD_NAME / _API_KEY / _API_SECRET)");
            }
            let store = CloudinaryImageStore::new(cloudinary);
            let mapping = ImageMapping::load(&mapping_file)?;
            if mapping.is_empty() {
                eyre::bail!("{} maps no files", mapping_file.display());
            }
            info!(files = mapping.len(), dir = %dir.display(), "Uploading product images");

            let uploaded = sync::upload_images(&store, &dir, &mapping).await?;
            mapping::write_results(&output, &uploaded)?;
            info!(
                uploaded = uploaded.len(),
                output = %output.display(),
                "Upload complete"
            );
        }

        Commands::AssignImages { input } => {
            let uploaded = mapping::read_results(&input)?;
            let config = MongoConfig::from_env()?;
            let client = database::mongodb::connect_from_config(&config).await?;
            let details = MongoDetailRepository::new(&client.database(config.database()));

            let assigned = sync::assign_images(&details, &uploaded).await?;
            info!(assigned, "Detail documents updated");

            database::mongodb::close(client).await;
        }

        Commands::SeedDetails { input, images } => {
            let mut seeds = mapping::read_details(&input)?;
            if let Some(images) = images {
                sync::attach_uploaded(&mut seeds, &mapping::read_results(&images)?);
            }
            info!(documents = seeds.len(), input = %input.display(), "Seeding detail documents");

            let config = MongoConfig::from_env()?;
            let client = database::mongodb::connect_from_config(&config).await?;
            let details = MongoDetailRepository::new(&client.database(config.database()));

            let seeded = sync::seed_details(&details, seeds).await?;
            info!(seeded, "Detail documents seeded");

            database::mongodb::close(client).await;
        }
    }

    Ok(())
}
