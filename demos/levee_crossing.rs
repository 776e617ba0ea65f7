use raster_pathfinding::{Coord, PathMarker, Raster, RasterPathfinder, RouteConfig};
use raster_pathfinding_benchmark::get_benchmark;

// Routes across the levee fixture, a 12x8 raster with 25 m cells in which 0 marks
// the levee wall and -9999 a patch without data. The start point lies on the wall
// itself and is snapped to the nearest crossable cell. Path cells are written
// with their accumulated cost in metres.

fn main() {
    let (grid, _) = get_benchmark("levee").unwrap();
    let raster = Raster::new(grid.values, grid.x_coords, grid.y_coords, grid.nodata).unwrap();
    let config = RouteConfig::new()
        .with_barriers([0.0])
        .with_snap_start(true)
        .with_marker(PathMarker::AccumulatedCost);
    let pathfinder = RasterPathfinder::new(&raster, config).unwrap();
    println!("{}", pathfinder.grid());

    let start = Coord::new(500_140.0, 4_100_120.0);
    let end = Coord::new(500_290.0, 4_100_010.0);
    let route = pathfinder.route(start, end).unwrap();
    println!(
        "Snapped start {} to {}, reached {} at cost {:.2}",
        start, route.start, route.goal, route.path.cost
    );
    let output = pathfinder.rasterize(&route.path).unwrap();
    for row in output.values().chunks(output.width()) {
        let line: Vec<String> = row
            .iter()
            .map(|v| if *v == -9999.0 { "    .".to_owned() } else { format!("{v:5.0}") })
            .collect();
        println!("{}", line.join(""));
    }
}
