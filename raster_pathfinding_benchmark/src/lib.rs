use csv::ReaderBuilder;
use grid_util::point::Point;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Root of the fixture maps and scenarios shipped with the repository.
pub fn fixtures_dir() -> PathBuf {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures")).to_path_buf()
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// A raster read from an Esri ASCII grid, with one coordinate per cell center. Rows are
/// stored north to south, so `y_coords` decrease.
#[derive(Clone, Debug)]
pub struct AsciiGrid {
    pub ncols: usize,
    pub nrows: usize,
    pub values: Vec<f64>,
    pub x_coords: Vec<f64>,
    pub y_coords: Vec<f64>,
    pub nodata: Option<f64>,
}

impl AsciiGrid {
    /// Parses the header (`ncols`, `nrows`, `xllcorner`, `yllcorner`, then either
    /// `cellsize` or `dx` and `dy`, optionally `NODATA_value`) followed by `nrows` rows
    /// of whitespace separated values.
    pub fn parse(text: &str) -> io::Result<AsciiGrid> {
        let mut ncols = None;
        let mut nrows = None;
        let mut xll = None;
        let mut yll = None;
        let mut dx = None;
        let mut dy = None;
        let mut nodata = None;
        let mut lines = text.lines().peekable();
        while let Some(line) = lines.peek() {
            let Some((key, value)) = line.split_once(char::is_whitespace) else {
                break;
            };
            let value = value.trim();
            let number = || {
                value
                    .parse::<f64>()
                    .map_err(|_| invalid(format!("could not parse header value {value:?}")))
            };
            match key.to_ascii_lowercase().as_str() {
                "ncols" => ncols = Some(number()? as usize),
                "nrows" => nrows = Some(number()? as usize),
                "xllcorner" => xll = Some(number()?),
                "yllcorner" => yll = Some(number()?),
                "cellsize" => {
                    dx = Some(number()?);
                    dy = dx;
                }
                "dx" => dx = Some(number()?),
                "dy" => dy = Some(number()?),
                "nodata_value" => nodata = Some(number()?),
                _ => break,
            }
            lines.next();
        }
        let header = |name: &str, v: Option<f64>| v.ok_or_else(|| invalid(format!("missing {name} header")));
        let ncols = ncols.ok_or_else(|| invalid("missing ncols header".into()))?;
        let nrows = nrows.ok_or_else(|| invalid("missing nrows header".into()))?;
        let (xll, yll) = (header("xllcorner", xll)?, header("yllcorner", yll)?);
        let (dx, dy) = (header("dx", dx)?, header("dy", dy)?);

        let values = lines
            .flat_map(str::split_whitespace)
            .map(|v| v.parse::<f64>().map_err(|_| invalid(format!("could not parse value {v:?}"))))
            .collect::<io::Result<Vec<f64>>>()?;
        if values.len() != ncols * nrows {
            return Err(invalid(format!(
                "expected {} values for a {ncols}x{nrows} grid, found {}",
                ncols * nrows,
                values.len()
            )));
        }
        let x_coords = (0..ncols).map(|c| xll + (c as f64 + 0.5) * dx).collect();
        let y_coords = (0..nrows)
            .map(|r| yll + ((nrows - 1 - r) as f64 + 0.5) * dy)
            .collect();
        Ok(AsciiGrid {
            ncols,
            nrows,
            values,
            x_coords,
            y_coords,
            nodata,
        })
    }

    /// Real-world center of a cell.
    pub fn center(&self, cell: Point) -> (f64, f64) {
        (self.x_coords[cell.x as usize], self.y_coords[cell.y as usize])
    }
}

#[allow(unused)]
#[derive(Debug, Deserialize)]
struct ScenarioRecord {
    id: u32,
    map: String,
    connectivity: u8,
    start_col: u32,
    start_row: u32,
    goal_col: u32,
    goal_row: u32,
    cost: f64,
}

/// A routing query on a fixture map with its known optimal cost.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub id: u32,
    pub connectivity: u8,
    pub start: Point,
    pub goal: Point,
    pub cost: f64,
}

fn load_scenarios(path: &Path) -> io::Result<Vec<Scenario>> {
    let reader = io::BufReader::new(File::open(path)?);
    let mut lines = reader.lines();

    // Skip the version line
    lines.next();

    let remaining_data = lines.collect::<Result<Vec<_>, _>>()?.join("\n");
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_reader(remaining_data.as_bytes());

    let mut scenarios = Vec::new();
    for result in csv_reader.deserialize() {
        let record: ScenarioRecord = result?;
        scenarios.push(Scenario {
            id: record.id,
            connectivity: record.connectivity,
            start: Point::new(record.start_col as i32, record.start_row as i32),
            goal: Point::new(record.goal_col as i32, record.goal_row as i32),
            cost: record.cost,
        });
    }
    Ok(scenarios)
}

fn load_benchmark(name: &str) -> io::Result<(AsciiGrid, Vec<Scenario>)> {
    let root = fixtures_dir();
    let map_str = fs::read_to_string(root.join("maps").join(format!("{name}.asc")))?;
    let grid = AsciiGrid::parse(&map_str)?;
    let scenarios = load_scenarios(&root.join("scenarios").join(format!("{name}.asc.scen")))?;
    Ok((grid, scenarios))
}

/// Names of all fixture maps, relative to the maps directory and without extension.
pub fn get_benchmark_names() -> io::Result<Vec<String>> {
    let root = fixtures_dir().join("maps").canonicalize()?;
    let mut names = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel_path = entry
            .path()
            .strip_prefix(&root)
            .map_err(|e| invalid(e.to_string()))?;
        if let Some(name) = rel_path.to_str().and_then(|p| p.strip_suffix(".asc")) {
            names.push(name.to_owned());
        }
    }
    Ok(names)
}

pub fn get_benchmark(name: &str) -> io::Result<(AsciiGrid, Vec<Scenario>)> {
    if get_benchmark_names()?.iter().any(|n| n == name) {
        load_benchmark(name)
    } else {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no fixture map named {name}"),
        ))
    }
}
