//! 3D LUT baking, application, and `.cube` text I/O.

use std::time::Instant;

use glam::DVec3;
use rayon::prelude::*;

use crate::error::{GradeError, GradeResult};
use crate::format::push_fixed;
use crate::transform::evaluate::{PreparedGrade, Stages, evaluate_transform};
use crate::transform::params::ColorGradeModel;

/// Grid size per axis of every synthesized LUT.
pub const CUBE_SIZE: usize = 33;

/// Fractional digits per `.cube` value.
const CUBE_DIGITS: usize = 6;

/// Largest grid accepted by the parser.
const MAX_PARSE_SIZE: usize = 256;

/// Default generator name written to the header.
pub const DEFAULT_GENERATOR: &str = "Cinegrade";

/// A 3D lookup table.
///
/// Entries are stored in `.cube` file order: red varies fastest, blue
/// slowest, so `data[r + g * size + b * size²]`.
///
/// Only built through [`Lut3D::identity`] and [`Lut3D::from_cube_str`], so
/// `size >= 2` and `data.len() == size³` always hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    /// Grid size per axis.
    size: usize,
    /// Output RGB per grid point. Length = size³.
    data: Vec<[f64; 3]>,
    /// Minimum domain values per channel.
    domain_min: [f64; 3],
    /// Maximum domain values per channel.
    domain_max: [f64; 3],
}

impl Lut3D {
    /// Grid size per axis, at least 2.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Output RGB per grid point in file order.
    pub fn data(&self) -> &[[f64; 3]] {
        &self.data
    }

    pub fn domain_min(&self) -> [f64; 3] {
        self.domain_min
    }

    pub fn domain_max(&self) -> [f64; 3] {
        self.domain_max
    }

    /// Identity table of the given size. Sizes below 2 are raised to 2.
    pub fn identity(size: usize) -> Self {
        let size = size.max(2);
        let step = (size - 1) as f64;
        let mut data = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push([r as f64 / step, g as f64 / step, b as f64 / step]);
                }
            }
        }
        Self {
            size,
            data,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
        }
    }

    /// Bake a prepared grade into a new table.
    pub fn baked(size: usize, grade: &PreparedGrade) -> Self {
        let mut lut = Self::identity(size);
        lut.bake(grade);
        lut
    }

    /// Overwrite every grid point with the graded value of its input color.
    ///
    /// Slabs of constant blue are evaluated in parallel.
    pub fn bake(&mut self, grade: &PreparedGrade) {
        let n = self.size;
        let step = (n - 1) as f64;
        self.data
            .par_chunks_mut(n * n)
            .enumerate()
            .for_each(|(b, slab)| {
                let bf = b as f64 / step;
                for g in 0..n {
                    let gf = g as f64 / step;
                    for r in 0..n {
                        let rgb = DVec3::new(r as f64 / step, gf, bf);
                        slab[g * n + r] = evaluate_transform(rgb, grade).to_array();
                    }
                }
            });
    }

    /// Index of grid point (r, g, b) in `data`.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        b * self.size * self.size + g * self.size + r
    }

    #[inline]
    fn get(&self, r: usize, g: usize, b: usize) -> DVec3 {
        DVec3::from_array(self.data[self.index(r, g, b)])
    }

    /// Apply this LUT to an RGB value using trilinear interpolation.
    ///
    /// Inputs outside the domain are clamped to its edges.
    pub fn apply(&self, rgb: DVec3) -> DVec3 {
        let min = DVec3::from_array(self.domain_min);
        let max = DVec3::from_array(self.domain_max);
        let span = (max - min).max(DVec3::splat(f64::EPSILON));
        let n = (self.size - 1) as f64;
        let pos = ((rgb - min) / span).clamp(DVec3::ZERO, DVec3::ONE) * n;

        let last = self.size - 2;
        let ri = (pos.x.floor() as usize).min(last);
        let gi = (pos.y.floor() as usize).min(last);
        let bi = (pos.z.floor() as usize).min(last);
        let t = pos - DVec3::new(ri as f64, gi as f64, bi as f64);

        let c00 = self.get(ri, gi, bi).lerp(self.get(ri + 1, gi, bi), t.x);
        let c10 = self.get(ri, gi + 1, bi).lerp(self.get(ri + 1, gi + 1, bi), t.x);
        let c01 = self.get(ri, gi, bi + 1).lerp(self.get(ri + 1, gi, bi + 1), t.x);
        let c11 = self
            .get(ri, gi + 1, bi + 1)
            .lerp(self.get(ri + 1, gi + 1, bi + 1), t.x);

        let c0 = c00.lerp(c10, t.y);
        let c1 = c01.lerp(c11, t.y);
        c0.lerp(c1, t.z)
    }

    /// Render as `.cube` text with the default header for `title`.
    pub fn to_cube(&self, title: &str) -> String {
        self.write_cube(&LutConfig::default().header_lines(title))
    }

    /// Render as `.cube` text. Each header entry becomes one `# ` comment line.
    pub fn write_cube(&self, header: &[String]) -> String {
        self.render(header).0
    }

    /// Text plus the byte offset of the first data line.
    fn render(&self, header: &[String]) -> (String, usize) {
        let n = self.size;
        let mut out = String::new();
        for line in header {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!("LUT_3D_SIZE {n}\n"));
        if self.domain_min != [0.0; 3] || self.domain_max != [1.0; 3] {
            out.push_str(&format!("DOMAIN_MIN {}\n", join_fixed(&self.domain_min)));
            out.push_str(&format!("DOMAIN_MAX {}\n", join_fixed(&self.domain_max)));
        }
        out.push('\n');
        let data_start = out.len();

        // "0.000000 0.000000 0.000000\n"
        let line_len = 3 * (CUBE_DIGITS + 3);
        let slabs: Vec<String> = self
            .data
            .par_chunks(n * n)
            .map(|slab| {
                let mut text = String::with_capacity(slab.len() * line_len);
                for [r, g, b] in slab {
                    push_fixed(&mut text, *r, CUBE_DIGITS);
                    text.push(' ');
                    push_fixed(&mut text, *g, CUBE_DIGITS);
                    text.push(' ');
                    push_fixed(&mut text, *b, CUBE_DIGITS);
                    text.push('\n');
                }
                text
            })
            .collect();

        out.reserve(slabs.iter().map(String::len).sum());
        for slab in &slabs {
            out.push_str(slab);
        }
        (out, data_start)
    }

    /// Parse `.cube` text.
    ///
    /// Understands comments, `TITLE`, `LUT_3D_SIZE`, `DOMAIN_MIN` and
    /// `DOMAIN_MAX`. The number of data lines must equal size³.
    pub fn from_cube_str(text: &str) -> GradeResult<Self> {
        let mut size: Option<usize> = None;
        let mut domain_min = [0.0; 3];
        let mut domain_max = [1.0; 3];
        let mut data: Vec<[f64; 3]> = Vec::new();

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut words = line.split_whitespace();
            match words.next() {
                Some("TITLE") => continue,
                Some("LUT_1D_SIZE") => {
                    return Err(GradeError::Cube("expected 3D LUT, found 1D".into()));
                }
                Some("LUT_3D_SIZE") => {
                    if !data.is_empty() {
                        return Err(cube_error(number, "LUT_3D_SIZE after data"));
                    }
                    size = Some(parse_size(words.next(), number)?);
                }
                Some("DOMAIN_MIN") => domain_min = parse_triple(words, number)?,
                Some("DOMAIN_MAX") => domain_max = parse_triple(words, number)?,
                Some(_) => {
                    if size.is_none() {
                        return Err(cube_error(number, "data before LUT_3D_SIZE"));
                    }
                    data.push(parse_triple(line.split_whitespace(), number)?);
                }
                None => continue,
            }
        }

        let size = size.ok_or_else(|| GradeError::Cube("missing LUT_3D_SIZE".into()))?;
        let expected = size * size * size;
        if data.len() != expected {
            return Err(GradeError::Cube(format!(
                "expected {expected} entries, found {}",
                data.len()
            )));
        }
        if (0..3).any(|i| domain_max[i] <= domain_min[i]) {
            return Err(GradeError::Cube("DOMAIN_MAX must exceed DOMAIN_MIN".into()));
        }

        Ok(Self {
            size,
            data,
            domain_min,
            domain_max,
        })
    }
}

fn join_fixed(values: &[f64; 3]) -> String {
    let mut out = String::new();
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        push_fixed(&mut out, *v, CUBE_DIGITS);
    }
    out
}

fn cube_error(line: usize, message: &str) -> GradeError {
    GradeError::Cube(format!("line {}: {message}", line + 1))
}

fn parse_size(word: Option<&str>, line: usize) -> GradeResult<usize> {
    let size = word
        .and_then(|w| w.parse::<usize>().ok())
        .ok_or_else(|| cube_error(line, "malformed LUT_3D_SIZE"))?;
    if !(2..=MAX_PARSE_SIZE).contains(&size) {
        return Err(cube_error(line, "LUT_3D_SIZE out of range"));
    }
    Ok(size)
}

fn parse_triple<'a>(mut words: impl Iterator<Item = &'a str>, line: usize) -> GradeResult<[f64; 3]> {
    let mut out = [0.0; 3];
    for slot in &mut out {
        *slot = words
            .next()
            .and_then(|w| w.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .ok_or_else(|| cube_error(line, "expected three numbers"))?;
    }
    if words.next().is_some() {
        return Err(cube_error(line, "expected three numbers"));
    }
    Ok(out)
}

/// Header and stage options for synthesized LUTs.
#[derive(Debug, Clone, PartialEq)]
pub struct LutConfig {
    /// Written as `# Created by {generator}`.
    pub generator: String,
    /// Extra comment lines after the title.
    pub metadata: Vec<String>,
    pub stages: Stages,
}

impl Default for LutConfig {
    fn default() -> Self {
        Self {
            generator: DEFAULT_GENERATOR.to_string(),
            metadata: Vec::new(),
            stages: Stages::Full,
        }
    }
}

impl LutConfig {
    /// Comment lines for a LUT titled `title`, without the `# ` prefix.
    pub fn header_lines(&self, title: &str) -> Vec<String> {
        let mut lines = Vec::with_capacity(2 + self.metadata.len());
        lines.push(format!("Created by {}", single_line(&self.generator)));
        lines.push(format!("Title: {}", single_line(title)));
        lines.extend(self.metadata.iter().map(|m| single_line(m)));
        lines
    }
}

/// Line breaks would start a new header line, so they become spaces.
fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// A rendered `.cube` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LutDocument {
    text: String,
    data_start: usize,
}

impl LutDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Header lines, including `LUT_3D_SIZE` and the blank separator.
    pub fn header(&self) -> &str {
        &self.text[..self.data_start]
    }

    /// The `r g b` lines in file order.
    pub fn data_lines(&self) -> impl Iterator<Item = &str> {
        self.text[self.data_start..].lines()
    }
}

impl std::fmt::Display for LutDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Renders models into 33³ `.cube` documents.
#[derive(Debug, Clone, Default)]
pub struct LutSynthesizer {
    config: LutConfig,
}

impl LutSynthesizer {
    pub fn new(config: LutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LutConfig {
        &self.config
    }

    /// Bake `model` into an in-memory table.
    pub fn bake(&self, model: &ColorGradeModel) -> GradeResult<Lut3D> {
        let grade = PreparedGrade::new(model, self.config.stages)?;
        Ok(Lut3D::baked(CUBE_SIZE, &grade))
    }

    /// Bake and render `model` as a `.cube` document titled `title`.
    pub fn synthesize(&self, model: &ColorGradeModel, title: &str) -> GradeResult<LutDocument> {
        let started = Instant::now();
        tracing::debug!(
            "synthesizing {CUBE_SIZE}³ LUT for {title:?} ({:?})",
            self.config.stages
        );

        let lut = self.bake(model)?;
        let (text, data_start) = lut.render(&self.config.header_lines(title));

        tracing::debug!(
            "LUT for {title:?} ready: {} bytes in {:.1} ms",
            text.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(LutDocument { text, data_start })
    }
}

/// [`LutSynthesizer::synthesize`] with the default configuration.
pub fn synthesize(model: &ColorGradeModel, title: &str) -> GradeResult<LutDocument> {
    LutSynthesizer::default().synthesize(model, title)
}
