//! End-to-end search scenarios on fixture grids.

use std::sync::atomic::AtomicBool;

use gridnav_core::{CostModifiers, Direction, NavGrid, Position, RegionId, SpawnState};
use gridnav_search::{search, Path, SearchContext, SearchOutcome, SearchSettings};
use gridnav_space::TileGrid;
use gridnav_test_utils::{corridor_grid, open_grid, walled_grid};

fn run(grid: &TileGrid, from: (i32, i32), to: (i32, i32), settings: &SearchSettings) -> SearchOutcome {
    let cancel = AtomicBool::new(false);
    let begin = grid.try_get_cell(Position::new(from.0, from.1)).unwrap();
    let end = grid.try_get_cell(Position::new(to.0, to.1)).unwrap();
    search(SearchContext::new(grid, begin, end, settings, &cancel)).unwrap()
}

fn path(outcome: SearchOutcome) -> Path {
    match outcome {
        SearchOutcome::Found(path) => path,
        other => panic!("expected a path, got {other:?}"),
    }
}

#[test]
fn corridor_door_is_paid_when_unavoidable() {
    let grid = corridor_grid(5, &[2]);
    let p = path(run(&grid, (0, 0), (4, 0), &SearchSettings::default()));
    assert_eq!(p.len(), 4);
    assert_eq!(p.cost(), 14.0);
    assert_eq!(p.connections()[2].cost, 11.0);
}

#[test]
fn entity_detour_beats_penalty() {
    let mut grid = open_grid(3, 3);
    grid.set_entity(Position::new(1, 1), true).unwrap();
    let p = path(run(&grid, (1, 0), (1, 2), &SearchSettings::default()));
    assert!(p.positions().iter().all(|&pos| pos != Position::new(1, 1)));
    assert!((p.cost() - 2.0 * std::f32::consts::SQRT_2).abs() < 1e-4);
}

#[test]
fn wall_forces_route_around() {
    let grid = walled_grid(5, 5, &[(2, 0), (2, 1), (2, 2), (2, 3)]);
    let p = path(run(&grid, (0, 0), (4, 0), &SearchSettings::default()));
    assert!(p.positions().contains(&Position::new(2, 4)));
    assert!(p.connections().windows(2).all(|w| w[0].end == w[1].begin));
}

#[test]
fn despawning_region_is_routed_around() {
    let grid = TileGrid::new(6, 6, 3).unwrap();
    grid.set_spawn_state(RegionId(0), SpawnState::Spawned).unwrap();
    // Region 1 covers x 3..6, y 0..3.
    grid.set_spawn_state(RegionId(1), SpawnState::Despawning)
        .unwrap();
    let p = path(run(&grid, (2, 0), (5, 5), &SearchSettings::default()));
    assert!(p
        .positions()
        .iter()
        .all(|pos| grid.region_of(*pos) != Some(RegionId(1))));
}

#[test]
fn disconnected_goal_exhausts() {
    let grid = walled_grid(5, 5, &[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]);
    assert!(matches!(
        run(&grid, (0, 0), (4, 4), &SearchSettings::default()),
        SearchOutcome::Exhausted(None)
    ));
}

#[test]
fn cardinal_policy_uses_no_diagonals() {
    let grid = open_grid(5, 5);
    let settings = SearchSettings {
        diagonals: gridnav_core::DiagonalPolicy::Never,
        modifiers: CostModifiers::NONE,
        ..SearchSettings::default()
    };
    let p = path(run(&grid, (0, 0), (4, 4), &settings));
    assert_eq!(p.cost(), 8.0);
    assert!(p.connections().iter().all(|c| !c.direction.is_diagonal()));
    assert!(p
        .connections()
        .iter()
        .all(|c| Direction::CARDINAL.contains(&c.direction)));
}
