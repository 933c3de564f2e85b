//! CSV ingest and emit for scatters, placements, and thresholds.
//!
//! Input files carry `x,y[,side][,corner]` rows, comma or semicolon
//! separated, with or without a header line. A `side` of `INF` (or any
//! non-finite value) reads back as "no requested size"; finite sides are
//! clamped up to [`MIN_SIDE`]. A `corner` in `0..=3` pins that corner as a
//! forced candidate. Rows whose coordinates do not parse are dropped, which
//! matches how hand-edited scatter files tend to arrive.
//!
//! Output files use the `x,y,side,size,corner` convention: labeled points
//! repeat their size in both columns; unlabeled points write `INF` with a
//! zero size and the corner the heuristic would have used.

use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{ensure, Context, Result};
use polars::prelude::*;

use labelplace::api::{Corner, LabelCandidate, ThresholdResult};
use labelplace::Vec2;

/// Side applied when the input carries no usable size column.
pub const DEFAULT_SIDE: f64 = 0.02;
/// Floor for requested sides; smaller or negative values are clamped up.
pub const MIN_SIDE: f64 = 1e-4;

/// Parsed input scatter: anchors plus optional per-point hints.
#[derive(Debug, Default)]
pub struct InputScatter {
    pub points: Vec<Vec2<f64>>,
    /// Requested label side per point; absent when the column is missing,
    /// empty, or non-finite.
    pub side: Vec<Option<f64>>,
    /// Pre-chosen corner per point, from a trailing `0..=3` column.
    pub corner: Vec<Option<Corner>>,
}

/// Read a scatter CSV, tolerating header/headerless and `,`/`;` layouts.
pub fn read_scatter(path: &Path) -> Result<InputScatter> {
    let Some((has_header, sep)) = sniff_layout(path)? else {
        return Ok(InputScatter::default());
    };
    let df = LazyCsvReader::new(path)
        .with_has_header(has_header)
        .with_separator(sep)
        .with_infer_schema_length(Some(100))
        .with_ignore_errors(true)
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    ensure!(
        df.width() >= 2,
        "{} needs at least x and y columns",
        path.display()
    );

    let cols = df.get_columns();
    let xs = float_col(&cols[0])?;
    let ys = float_col(&cols[1])?;
    let sides = if df.width() > 2 {
        Some(float_col(&cols[2])?)
    } else {
        None
    };
    let corners = if df.width() > 3 {
        Some(float_col(&cols[3])?)
    } else {
        None
    };

    let mut out = InputScatter::default();
    for i in 0..df.height() {
        let (Some(x), Some(y)) = (xs.get(i), ys.get(i)) else {
            continue;
        };
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        out.points.push(Vec2::new(x, y));
        let side = sides
            .as_ref()
            .and_then(|s| s.get(i))
            .filter(|v| v.is_finite())
            .map(|v| v.max(MIN_SIDE));
        out.side.push(side);
        let corner = corners
            .as_ref()
            .and_then(|s| s.get(i))
            .filter(|v| v.is_finite() && v.fract() == 0.0 && (0.0..=3.0).contains(v))
            .and_then(|v| Corner::from_index(v as usize));
        out.corner.push(corner);
    }
    Ok(out)
}

/// Write a bare `x,y` scatter.
pub fn write_points(path: &Path, points: &[Vec2<f64>]) -> Result<()> {
    let mut w = writer(path)?;
    writeln!(w, "x,y")?;
    for p in points {
        writeln!(w, "{},{}", p.x, p.y)?;
    }
    Ok(w.flush()?)
}

/// Write one row per point from a finished placement pass. `fallback` names
/// the corner reported for points that did not get a label.
pub fn write_labels(
    path: &Path,
    points: &[Vec2<f64>],
    candidates: &[LabelCandidate],
    fallback: &[Corner],
) -> Result<()> {
    let mut w = writer(path)?;
    writeln!(w, "x,y,side,size,corner")?;
    for (p, point) in points.iter().enumerate() {
        let placed = (0..4).map(|c| &candidates[p * 4 + c]).find(|c| c.valid);
        match placed {
            Some(c) => writeln!(
                w,
                "{},{},{},{},{}",
                point.x,
                point.y,
                c.size,
                c.size,
                c.corner.index()
            )?,
            None => writeln!(w, "{},{},INF,0,{}", point.x, point.y, fallback[p].index())?,
        }
    }
    Ok(w.flush()?)
}

/// Write one row per point from a threshold search.
pub fn write_thresholds(path: &Path, points: &[Vec2<f64>], res: &ThresholdResult) -> Result<()> {
    let mut w = writer(path)?;
    writeln!(w, "x,y,side,size,corner")?;
    for (p, point) in points.iter().enumerate() {
        if res.labeled[p] {
            writeln!(
                w,
                "{},{},{},{},{}",
                point.x,
                point.y,
                res.size[p],
                res.size[p],
                res.corner[p].index()
            )?;
        } else {
            writeln!(w, "{},{},INF,0,{}", point.x, point.y, res.corner[p].index())?;
        }
    }
    Ok(w.flush()?)
}

/// Peek at the first non-blank line to pick separator and header handling.
/// `None` means the file is empty. A line whose first field is not a number
/// is a header.
fn sniff_layout(path: &Path) -> Result<Option<(bool, u8)>> {
    let file =
        fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut first = String::new();
    loop {
        first.clear();
        let n = reader.read_line(&mut first)?;
        if n == 0 {
            return Ok(None);
        }
        if !first.trim().is_empty() {
            break;
        }
    }
    let sep = if first.contains(';') { b';' } else { b',' };
    let lead = first.split([',', ';']).next().unwrap_or("");
    let has_header = lead.trim().parse::<f64>().is_err();
    Ok(Some((has_header, sep)))
}

fn float_col(s: &Series) -> Result<Float64Chunked> {
    let cast = s.cast(&DataType::Float64)?;
    Ok(cast.f64()?.clone())
}

fn writer(path: &Path) -> Result<BufWriter<fs::File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelplace::api::{candidate_index, generate_candidates};
    use tempfile::tempdir;

    fn write_input(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_plain_csv_with_header() {
        let dir = tempdir().unwrap();
        let path = write_input(&dir, "in.csv", "x,y\n0.5,1.0\n-0.25,2\n");
        let scatter = read_scatter(&path).unwrap();
        assert_eq!(scatter.points.len(), 2);
        assert_eq!(scatter.points[0], Vec2::new(0.5, 1.0));
        assert_eq!(scatter.points[1], Vec2::new(-0.25, 2.0));
        assert_eq!(scatter.side, vec![None, None]);
        assert_eq!(scatter.corner, vec![None, None]);
    }

    #[test]
    fn reads_headerless_semicolons_with_hints() {
        let dir = tempdir().unwrap();
        let path = write_input(&dir, "in.csv", "0.5;1.0;0.3;2\n1.5;2.0;INF;9\n");
        let scatter = read_scatter(&path).unwrap();
        assert_eq!(scatter.points.len(), 2);
        assert_eq!(scatter.side, vec![Some(0.3), None]);
        assert_eq!(scatter.corner, vec![Some(Corner::BottomRight), None]);
    }

    #[test]
    fn tiny_sides_are_clamped_up() {
        let dir = tempdir().unwrap();
        let path = write_input(&dir, "in.csv", "0.0,0.0,0.00000001\n1.0,1.0,-5\n");
        let scatter = read_scatter(&path).unwrap();
        assert_eq!(scatter.side, vec![Some(MIN_SIDE), Some(MIN_SIDE)]);
    }

    #[test]
    fn unparseable_rows_are_dropped() {
        let dir = tempdir().unwrap();
        let path = write_input(&dir, "in.csv", "x,y\n1.0,2.0\nfoo,3.0\n");
        let scatter = read_scatter(&path).unwrap();
        assert_eq!(scatter.points, vec![Vec2::new(1.0, 2.0)]);
    }

    #[test]
    fn empty_file_reads_as_empty_scatter() {
        let dir = tempdir().unwrap();
        let path = write_input(&dir, "in.csv", "");
        let scatter = read_scatter(&path).unwrap();
        assert!(scatter.points.is_empty());
    }

    #[test]
    fn label_rows_roundtrip() {
        let dir = tempdir().unwrap();
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)];
        let mut candidates = generate_candidates(&points, 0.25);
        candidates[candidate_index(0, Corner::TopRight)].valid = true;
        let fallback = vec![Corner::TopLeft, Corner::TopLeft];

        let path = dir.path().join("out.csv");
        write_labels(&path, &points, &candidates, &fallback).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["x,y,side,size,corner", "0,0,0.25,0.25,1", "1,1,INF,0,0"]
        );

        // Hint columns are positional: feeding a result file back in reads
        // its fourth column (the duplicated size) as the corner slot, so
        // only the integral zero of the unlabeled row qualifies as a hint.
        let back = read_scatter(&path).unwrap();
        assert_eq!(back.points, points);
        assert_eq!(back.side, vec![Some(0.25), None]);
        assert_eq!(back.corner, vec![None, Some(Corner::TopLeft)]);
    }

    #[test]
    fn writers_create_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deep/points.csv");
        write_points(&path, &[Vec2::new(0.5, -0.5)]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "x,y\n0.5,-0.5\n");
    }
}
