/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use image::{ImageReader, RgbaImage};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use yuvplanar::{
    uint8_to_float, ColorMatrix, DitherMode, PipelineOptions, PixelBuffer, Pipeline, YuvRange,
    YuvStandardMatrix,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MatrixArg {
    /// Three decimal JPEG table, decoded as BT.601
    Jpeg,
    Bt601,
    Bt709,
    Bt2020,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DitherArg {
    None,
    Ordered,
    Diffusion,
}

#[derive(Parser, Debug)]
#[command(name = "yuvplanar-app", about = "RGB to 8-bit YCbCr and back to RGBA")]
struct Args {
    input: PathBuf,
    output: PathBuf,
    #[arg(long, value_enum, default_value_t = MatrixArg::Jpeg)]
    matrix: MatrixArg,
    #[arg(long, value_enum, default_value_t = DitherArg::None)]
    dither: DitherArg,
    #[arg(long, default_value_t = 255)]
    alpha: u8,
    /// Limited luma and chroma codes, ignored for `jpeg`
    #[arg(long, default_value_t = false)]
    video_range: bool,
    #[arg(short = 'j', long)]
    threads: Option<usize>,
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn options_from_args(args: &Args) -> Result<PipelineOptions> {
    let range = if args.video_range {
        YuvRange::Limited
    } else {
        YuvRange::Full
    };
    let mut options = match args.matrix {
        MatrixArg::Jpeg => PipelineOptions {
            forward_matrix: ColorMatrix::jpeg_bt601(),
            ..PipelineOptions::default()
        },
        MatrixArg::Bt601 => PipelineOptions::for_standard(YuvStandardMatrix::Bt601, range)?,
        MatrixArg::Bt709 => PipelineOptions::for_standard(YuvStandardMatrix::Bt709, range)?,
        MatrixArg::Bt2020 => PipelineOptions::for_standard(YuvStandardMatrix::Bt2020, range)?,
    };
    options.dither = match args.dither {
        DitherArg::None => DitherMode::None,
        DitherArg::Ordered => DitherMode::Ordered,
        DitherArg::Diffusion => DitherMode::ErrorDiffusion,
    };
    options.alpha = args.alpha;
    Ok(options)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| anyhow!("rayon init failed: {}", e))?;
    }

    let img = ImageReader::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?
        .decode()
        .with_context(|| format!("failed to decode {}", args.input.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();

    let bytes = PixelBuffer::from_vec(img.into_raw(), width, height, width as usize * 3, 3)?;
    let rgb = uint8_to_float(&bytes, &[1.; 3], &[0.; 3])?;

    let pipeline = Pipeline::new(options_from_args(&args)?)?;
    let start_time = Instant::now();
    let output = pipeline.run(&rgb)?;
    info!(
        width,
        height,
        elapsed = ?start_time.elapsed(),
        "Pipeline finished"
    );

    let rgba = RgbaImage::from_raw(width, height, output.rgba.to_packed().into_vec())
        .ok_or_else(|| anyhow!("output buffer size mismatch"))?;
    rgba.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}
