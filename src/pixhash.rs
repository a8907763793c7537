// src/pixhash.rs
//
// Verification CLI: decode each image, print all four perceptual hashes in
// hex, optionally the pairwise Hamming distances between two files.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;

use pixhash::{
    HashConfig, ImageHash, MAX_HASH_SIZE, PixelBuffer, average_hash, difference_hash_horizontal,
    difference_hash_vertical, perceptual_hash,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Prints perceptual image hashes.", long_about = None)]
struct Cli {
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Hash grid side length; every hash carries hash-size^2 bits
    #[arg(long, default_value_t = 8)]
    hash_size: u32,

    /// Print pairwise Hamming distances (needs exactly two files)
    #[arg(long)]
    distance: bool,
}

impl Cli {
    fn validate(&self) -> Result<(), String> {
        if self.hash_size == 0 || self.hash_size > MAX_HASH_SIZE {
            return Err(format!(
                "Hash size must be 1-{MAX_HASH_SIZE}. Got {}.",
                self.hash_size
            ));
        }
        if self.distance && self.files.len() != 2 {
            return Err(format!(
                "--distance needs exactly two files. Got {}.",
                self.files.len()
            ));
        }
        Ok(())
    }
}

struct FileHashes {
    width: u32,
    height: u32,
    ahash: ImageHash,
    phash: ImageHash,
    dhash: ImageHash,
    dhash_v: ImageHash,
}

fn hash_file(path: &Path, config: HashConfig) -> Result<FileHashes> {
    let img = image::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let pixels = PixelBuffer::from_image(&img)
        .with_context(|| format!("cannot read pixels of {}", path.display()))?;
    Ok(FileHashes {
        width: pixels.width(),
        height: pixels.height(),
        ahash: average_hash(&pixels, config)?,
        phash: perceptual_hash(&pixels, config)?,
        dhash: difference_hash_horizontal(&pixels, config)?,
        dhash_v: difference_hash_vertical(&pixels, config)?,
    })
}

fn main() -> Result<()> {
    let args = Cli::parse();
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    let config = HashConfig::new(args.hash_size);

    // One independent computation per file; print in argument order
    let results: Vec<(PathBuf, Result<FileHashes>)> = args
        .files
        .par_iter()
        .map(|path| (path.clone(), hash_file(path, config)))
        .collect();

    let mut failures = 0usize;
    for (path, result) in &results {
        match result {
            Ok(h) => {
                println!("File: {} ({}x{})", path.display(), h.width, h.height);
                println!("ahash:   {}", h.ahash);
                println!("phash:   {}", h.phash);
                println!("dhash:   {}", h.dhash);
                println!("dhash_v: {}", h.dhash_v);
            }
            Err(e) => {
                eprintln!("Error: {e:#}");
                failures += 1;
            }
        }
    }

    if args.distance
        && let [(_, Ok(a)), (_, Ok(b))] = &results[..]
    {
        println!("Distance (ahash):   {}", a.ahash.distance(&b.ahash)?);
        println!("Distance (phash):   {}", a.phash.distance(&b.phash)?);
        println!("Distance (dhash):   {}", a.dhash.distance(&b.dhash)?);
        println!("Distance (dhash_v): {}", a.dhash_v.distance(&b.dhash_v)?);
    }

    if failures > 0 {
        process::exit(1);
    }
    Ok(())
}
