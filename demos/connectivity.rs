use raster_pathfinding::{Connectivity, Coord, Raster, RasterPathfinder, RouteConfig};

// In this example a path is found on a 5x5 raster with shape
//  _____
// |S    |
// |     |
// |## ##|
// |     |
// |    E|
//  _____
// where
// - # marks a barrier cell (value 0)
// - S marks the start
// - E marks the end
//
// With an 8-neighborhood the path cuts diagonally through the gap, with a
// 4-neighborhood it has to take the staircase.

fn main() {
    let mut values = vec![1.0f64; 25];
    for x in [0, 1, 3, 4] {
        values[2 * 5 + x] = 0.0;
    }
    let raster = Raster::with_uniform_coords(5, 5, values, Coord::new(0.5, 0.5), 1.0, 1.0, None).unwrap();
    let start = Coord::new(0.5, 0.5);
    let end = Coord::new(4.5, 4.5);
    for connectivity in [Connectivity::Eight, Connectivity::Four] {
        let config = RouteConfig::new()
            .with_barriers([0.0])
            .with_connectivity(connectivity);
        let pathfinder = RasterPathfinder::new(&raster, config).unwrap();
        println!("{}", pathfinder.grid());
        let route = pathfinder.route(start, end).unwrap();
        println!("{connectivity}: cost {:.3}", route.path.cost);
        for p in &route.path.cells {
            println!("{:?}", p);
        }
    }
}
