use raster_pathfinding::{
    AstarSolver, Connectivity, Coord, DijkstraSolver, GridSolver, PathMarker, Raster, RasterPathfinder,
    RouteConfig,
};
use raster_pathfinding_benchmark::{get_benchmark, get_benchmark_names, AsciiGrid};

fn to_raster(grid: &AsciiGrid) -> Raster<f64> {
    Raster::new(
        grid.values.clone(),
        grid.x_coords.clone(),
        grid.y_coords.clone(),
        grid.nodata,
    )
    .unwrap()
}

fn config(connectivity: u8) -> RouteConfig<f64> {
    RouteConfig::new()
        .with_barriers([0.0])
        .with_connectivity(Connectivity::try_from(connectivity).unwrap())
}

#[test]
fn verify_solution_distance_astar() {
    for name in get_benchmark_names().unwrap() {
        let (grid, scenarios) = get_benchmark(&name).unwrap();
        let raster = to_raster(&grid);
        for scenario in &scenarios {
            let pathfinder = RasterPathfinder::new(&raster, config(scenario.connectivity)).unwrap();
            let (sx, sy) = grid.center(scenario.start);
            let (gx, gy) = grid.center(scenario.goal);
            println!(
                "{name} #{}: {} -> {} with {}-connectivity, expected {}",
                scenario.id, scenario.start, scenario.goal, scenario.connectivity, scenario.cost
            );
            let route = pathfinder.route(Coord::new(sx, sy), Coord::new(gx, gy)).unwrap();
            assert_eq!(route.start, scenario.start);
            assert_eq!(route.goal, scenario.goal);
            let delta = (route.path.cost - scenario.cost).abs() / scenario.cost;
            assert!(delta < 1e-9, "got {}, expected {}", route.path.cost, scenario.cost);
            assert!(route.path.is_connected(pathfinder.grid().connectivity()));
            let summed = AstarSolver::new().get_path_cost(&route.path.cells, pathfinder.grid());
            assert!((summed.unwrap() - route.path.cost).abs() < 1e-6);
        }
    }
}

#[test]
fn verify_solution_distance_dijkstra() {
    let (grid, scenarios) = get_benchmark("levee").unwrap();
    let raster = to_raster(&grid);
    for scenario in &scenarios {
        let pathfinder = RasterPathfinder::new(&raster, config(scenario.connectivity)).unwrap();
        let path = DijkstraSolver
            .get_path_single_goal(pathfinder.grid(), scenario.start, scenario.goal, &Default::default())
            .unwrap();
        let delta = (path.cost - scenario.cost).abs() / scenario.cost;
        assert!(delta < 1e-9);
    }
}

#[test]
fn accumulated_cost_raster_ends_at_route_cost() {
    let (grid, scenarios) = get_benchmark("terraces").unwrap();
    let raster = to_raster(&grid);
    let scenario = &scenarios[0];
    let config = config(scenario.connectivity).with_marker(PathMarker::AccumulatedCost);
    let pathfinder = RasterPathfinder::new(&raster, config).unwrap();
    let (sx, sy) = grid.center(scenario.start);
    let (gx, gy) = grid.center(scenario.goal);
    let output = pathfinder.route_raster(Coord::new(sx, sy), Coord::new(gx, gy)).unwrap();
    assert_eq!(output.get(scenario.start), Some(0.0));
    let at_goal = output.get(scenario.goal).unwrap();
    assert!((at_goal - scenario.cost).abs() < 1e-6);
    assert_eq!(output.x_coords(), raster.x_coords());
    assert_eq!(output.nodata(), Some(-9999.0));
}
