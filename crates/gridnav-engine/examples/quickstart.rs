//! Build a small grid, start a navigation service, and request a path.
//!
//! Run with `cargo run -p gridnav-engine --example quickstart`.

use std::sync::Arc;

use gridnav_core::{Direction, Position};
use gridnav_engine::{NavigationService, Request, ServiceConfig};
use gridnav_search::PathDrawer;
use gridnav_space::TileGrid;

struct Printer;

impl PathDrawer for Printer {
    fn line(&mut self, from: Position, to: Position) {
        println!("  {from} -> {to}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut grid = TileGrid::new(8, 6, 4)?;
    for y in 0..5 {
        grid.set_wall(Position::new(4, y), true)?;
    }
    grid.set_door(Position::new(3, 5), Direction::East, true)?;

    let mut service = NavigationService::new(Arc::new(grid), ServiceConfig::default())?;
    service.start();
    service.set_ticking(true);

    let result = service.process_blocking(Request::euclidean((0, 0), (7, 0)));
    println!("{} in {:?}", result.state(), result.elapsed());
    if let Some(path) = result.path() {
        println!("cost {:.2} over {} steps", path.cost(), path.len());
        path.draw(0, &mut Printer);
    }

    let report = service.shutdown();
    println!("shutdown: {report:?}");
    Ok(())
}
