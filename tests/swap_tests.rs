//! Swap coordinator tests

use tui_match::core::{BoardConfig, Grid, SwapCoordinator, SwapError};
use tui_match::types::{GridPos, TileId, MOVE_DURATION_MS, TICK_MS};

fn config(width: u8, height: u8, palette: u8) -> BoardConfig {
    BoardConfig {
        width,
        height,
        palette,
        ..BoardConfig::default()
    }
}

fn three_by_three() -> Grid {
    Grid::from_rows(
        &config(3, 3, 4),
        &[&[0, 1, 2], &[1, 2, 3], &[2, 3, 0]],
    )
    .unwrap()
}

/// Tick until the coordinator reports done; panics if it never does.
fn finish_swap(grid: &mut Grid, swap: &mut SwapCoordinator) {
    let mut elapsed = 0;
    loop {
        grid.tick_motions(TICK_MS);
        if swap.poll(grid).is_some() {
            return;
        }
        elapsed += TICK_MS;
        assert!(
            elapsed <= MOVE_DURATION_MS + 4 * TICK_MS,
            "swap did not complete in time"
        );
    }
}

#[test]
fn test_swap_exchanges_identities_and_restores_rest() {
    let mut grid = three_by_three();
    let mut swap = SwapCoordinator::new();
    let a = GridPos::new(1, 1);
    let b = GridPos::new(2, 1);

    swap.begin(&mut grid, a, b).unwrap();
    finish_swap(&mut grid, &mut swap);

    assert_eq!(grid.identity(1, 1), Some(TileId(3)));
    assert_eq!(grid.identity(2, 1), Some(TileId(2)));
    // Everything else untouched
    assert_eq!(grid.identity(0, 0), Some(TileId(0)));
    assert_eq!(grid.identity(0, 1), Some(TileId(1)));
}

#[test]
fn test_swap_then_swap_back_restores_exactly() {
    let mut grid = three_by_three();
    let baseline = three_by_three();
    let mut swap = SwapCoordinator::new();
    let a = GridPos::new(0, 2);
    let b = GridPos::new(0, 1);

    swap.begin(&mut grid, a, b).unwrap();
    finish_swap(&mut grid, &mut swap);
    swap.begin(&mut grid, b, a).unwrap();
    finish_swap(&mut grid, &mut swap);

    for y in 0..3i16 {
        for x in 0..3i16 {
            assert_eq!(grid.identity(x, y), baseline.identity(x, y));
            let tile = grid.tile(x, y).unwrap();
            assert_eq!(tile.pos(), GridPos::new(x as u8, y as u8));
            assert_eq!(tile.pixel(), grid.slot_position(x as i32, y as i32));
            assert!(!tile.is_moving());
        }
    }
}

#[test]
fn test_logical_state_precedes_visual_settling() {
    let mut grid = three_by_three();
    let mut swap = SwapCoordinator::new();
    let a = GridPos::new(0, 0);
    let b = GridPos::new(1, 0);

    swap.begin(&mut grid, a, b).unwrap();

    // Halfway through the animation the layout is already exchanged...
    for _ in 0..(MOVE_DURATION_MS / TICK_MS / 2) {
        grid.tick_motions(TICK_MS);
        assert!(swap.poll(&grid).is_none());
    }
    assert_eq!(grid.identity(0, 0), Some(TileId(1)));
    assert_eq!(grid.identity(1, 0), Some(TileId(0)));

    // ...but the tiles are still traveling between the two slots
    assert!(grid.tile_at(a).unwrap().is_moving());
    assert!(grid.tile_at(b).unwrap().is_moving());
}

#[test]
fn test_diagonal_and_distant_swaps_rejected() {
    let mut grid = three_by_three();
    let mut swap = SwapCoordinator::new();

    for (a, b) in [
        (GridPos::new(0, 0), GridPos::new(1, 1)),
        (GridPos::new(0, 0), GridPos::new(2, 0)),
        (GridPos::new(0, 0), GridPos::new(0, 0)),
    ] {
        assert!(matches!(
            swap.begin(&mut grid, a, b),
            Err(SwapError::NotAdjacent { .. })
        ));
    }
    assert!(!swap.is_swapping());
    assert_eq!(grid.motions_in_flight(), 0);
}

#[test]
fn test_busy_coordinator_rejects_and_keeps_first_swap() {
    let mut grid = three_by_three();
    let mut swap = SwapCoordinator::new();

    swap.begin(&mut grid, GridPos::new(0, 0), GridPos::new(1, 0))
        .unwrap();
    assert_eq!(
        swap.begin(&mut grid, GridPos::new(2, 2), GridPos::new(1, 2)),
        Err(SwapError::Busy)
    );

    // The first swap still completes normally
    finish_swap(&mut grid, &mut swap);
    assert_eq!(grid.identity(0, 0), Some(TileId(1)));
    // The rejected pair never moved
    assert_eq!(grid.identity(2, 2), Some(TileId(0)));
    assert_eq!(grid.identity(1, 2), Some(TileId(3)));
}

#[test]
fn test_completion_reported_exactly_once() {
    let mut grid = three_by_three();
    let mut swap = SwapCoordinator::new();
    swap.begin(&mut grid, GridPos::new(1, 0), GridPos::new(1, 1))
        .unwrap();

    let mut completions = 0;
    let mut elapsed = 0;
    while elapsed <= 2 * MOVE_DURATION_MS {
        grid.tick_motions(TICK_MS);
        if swap.poll(&grid).is_some() {
            completions += 1;
        }
        elapsed += TICK_MS;
    }
    assert_eq!(completions, 1);
}
