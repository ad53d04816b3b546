use std::sync::Arc;

use broadside::{
    Board, BoardError, Coordinate, Direction, EventLog, FleetCollection, GameConfig, GameEvent,
    MoveOutcome, Phase, Ship, ShipKind, SpecialMove, SpecialOutcome, SHIP_LENGTHS,
    TOTAL_SHIP_CELLS,
};

/// Five ships in columns 0..=4, all heading down from row 0.
fn column_fleet() -> FleetCollection {
    let mut fleet = FleetCollection::new();
    for (x, &len) in SHIP_LENGTHS.iter().enumerate() {
        let ship = Ship::new(Coordinate::new(x as i32, 0), Direction::Down, len, x == 2).unwrap();
        fleet.add(ship).unwrap();
    }
    fleet
}

fn ship_cells() -> Vec<Coordinate> {
    SHIP_LENGTHS
        .iter()
        .enumerate()
        .flat_map(|(x, &len)| (0..len as i32).map(move |y| Coordinate::new(x as i32, y)))
        .collect()
}

fn ai_board(log: &EventLog) -> Board {
    let config = GameConfig::default().instant_meter();
    let mut board = Board::ai_with_fleet(column_fleet(), &config, Arc::new(log.clone()));
    board.start();
    board
}

/// Fire misses until the meter fills.
fn charge(board: &mut Board) {
    let mut misses = (0..10).rev().flat_map(|y| (5..10).map(move |x| Coordinate::new(x, y)));
    while !board.can_make_shield_move() {
        let coord = misses.next().unwrap();
        assert_eq!(board.enter_move(coord), MoveOutcome::Miss);
    }
}

#[test]
fn test_sinking_whole_fleet() {
    let log = EventLog::new();
    let mut board = ai_board(&log);
    let cells = ship_cells();
    assert_eq!(cells.len(), TOTAL_SHIP_CELLS);

    // fire in reverse to show the order does not matter
    for (i, &cell) in cells.iter().rev().enumerate() {
        assert_eq!(board.phase(), Phase::Active, "finished early at shot {}", i);
        assert_eq!(board.enter_move(cell), MoveOutcome::Hit);
    }
    assert_eq!(board.phase(), Phase::Finished);
    assert!(board.is_empty());
    assert_eq!(board.move_count(), 17);
    assert_eq!(board.hit_count(), 17);
    assert_eq!(board.hits().len(), 17);

    assert_eq!(
        log.count(|e| matches!(e, GameEvent::GameOver { target_board_empty: true })),
        1
    );
    let stats: Vec<_> = log
        .snapshot()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::StatsReady(result) => Some(result),
            _ => None,
        })
        .collect();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].hits(), 17);
    assert_eq!(stats[0].moves(), 17);
    assert_eq!(stats[0].ships_sunk(), 5);
    assert_eq!(stats[0].percent_hits(), 100);
    assert_eq!(board.gameplay_result(), Some(stats[0]));

    // a finished board ignores further shots
    assert_eq!(board.enter_move(Coordinate::new(9, 9)), MoveOutcome::Miss);
    assert_eq!(board.move_count(), 17);
}

#[test]
fn test_human_board_never_reports_stats() {
    let log = EventLog::new();
    let mut board = Board::with_fleet(column_fleet(), Arc::new(log.clone()));
    board.start();
    for cell in ship_cells() {
        board.enter_move(cell);
    }
    assert_eq!(board.phase(), Phase::Finished);
    assert_eq!(log.count(|e| matches!(e, GameEvent::GameOver { .. })), 1);
    assert_eq!(log.count(|e| matches!(e, GameEvent::StatsReady(_))), 0);
    assert_eq!(board.meter(), 0);
}

#[test]
fn test_off_board_shots_are_not_counted() {
    let log = EventLog::new();
    let mut board = ai_board(&log);
    assert_eq!(board.enter_move(Coordinate::new(-1, 0)), MoveOutcome::Miss);
    assert_eq!(board.enter_move(Coordinate::new(0, 10)), MoveOutcome::Miss);
    assert_eq!(board.move_count(), 0);
    assert_eq!(board.meter(), 0);
    assert_eq!(log.count(|e| matches!(e, GameEvent::MoveResolved { .. })), 0);
}

#[test]
fn test_shots_before_start_are_ignored() {
    let mut board = Board::with_fleet(column_fleet(), Arc::new(EventLog::new()));
    assert_eq!(board.phase(), Phase::Setup);
    assert_eq!(board.enter_move(Coordinate::new(0, 0)), MoveOutcome::Miss);
    assert_eq!(board.move_count(), 0);
    assert_eq!(board.ships_remaining(), 5);
}

#[test]
fn test_each_move_earns_a_decile() {
    let log = EventLog::new();
    let mut board = ai_board(&log);
    board.enter_move(Coordinate::new(9, 9));
    assert_eq!(board.meter(), 10);
    board.enter_move(Coordinate::new(0, 0));
    assert_eq!(board.meter(), 20);
    assert_eq!(
        log.count(|e| matches!(e, GameEvent::SpecialProgress { .. })),
        20
    );
    charge(&mut board);
    assert_eq!(board.meter(), 100);
    assert!(board.can_make_shield_move());
}

#[test]
fn test_shield_absorbs_one_shot() {
    let log = EventLog::new();
    let mut board = Board::with_fleet(column_fleet(), Arc::new(log.clone()));
    board.start();

    assert_eq!(board.place_shield(Coordinate::new(9, 9)), MoveOutcome::Miss);
    assert_eq!(board.place_shield(Coordinate::new(4, 2)), MoveOutcome::Shielded);
    assert_eq!(board.place_shield(Coordinate::new(4, 2)), MoveOutcome::Miss);
    assert!(board.shielded().contains(Coordinate::new(4, 2)));

    assert_eq!(board.enter_move(Coordinate::new(4, 2)), MoveOutcome::Shielded);
    assert!(board.shielded().is_empty());
    assert_eq!(board.hit_count(), 0);
    assert_eq!(board.move_count(), 1);

    assert_eq!(board.enter_move(Coordinate::new(4, 2)), MoveOutcome::Hit);
    assert_eq!(board.hit_count(), 1);
}

#[test]
fn test_shield_on_sunk_ship_is_rejected() {
    let mut board = Board::with_fleet(column_fleet(), Arc::new(EventLog::new()));
    board.start();
    board.enter_move(Coordinate::new(0, 0));
    // damaged but still afloat
    assert_eq!(board.place_shield(Coordinate::new(0, 0)), MoveOutcome::Shielded);
    board.enter_move(Coordinate::new(0, 0));
    board.enter_move(Coordinate::new(0, 1));
    assert_eq!(board.place_shield(Coordinate::new(0, 1)), MoveOutcome::Miss);
}

#[test]
fn test_special_requires_full_meter() {
    let log = EventLog::new();
    let mut board = ai_board(&log);
    assert_eq!(
        board.attempt_special_move(SpecialMove::Nuke, Coordinate::new(7, 7)),
        None
    );
    assert_eq!(board.move_count(), 0);
}

#[test]
fn test_nuke_on_open_water() {
    let log = EventLog::new();
    let mut board = ai_board(&log);
    charge(&mut board);
    let before = board.move_count();
    log.drain();

    let outcome = board
        .attempt_special_move(SpecialMove::Nuke, Coordinate::new(7, 2))
        .unwrap();
    let SpecialOutcome::Salvo(shots) = outcome else {
        panic!("nuke returned {:?}", outcome);
    };
    assert_eq!(shots.len(), 9);
    assert!(shots.iter().all(|&(_, o)| o == MoveOutcome::Miss));
    // row-major around the center
    assert_eq!(shots[0].0, Coordinate::new(6, 1));
    assert_eq!(shots[1].0, Coordinate::new(7, 1));
    assert_eq!(shots[3].0, Coordinate::new(6, 2));
    assert_eq!(shots[8].0, Coordinate::new(8, 3));

    assert_eq!(board.meter(), 0);
    assert_eq!(board.move_count(), before + 9);
    assert!(log
        .snapshot()
        .contains(&GameEvent::SpecialProgress { old: 100, new: 0 }));
}

#[test]
fn test_nuke_at_edge_skips_off_board_cells() {
    let log = EventLog::new();
    let mut board = ai_board(&log);
    charge(&mut board);
    let before = board.move_count();
    let outcome = board
        .attempt_special_move(SpecialMove::Nuke, Coordinate::new(0, 0))
        .unwrap();
    let hits = outcome
        .outcomes()
        .into_iter()
        .filter(|o| o.is_hit())
        .count();
    assert_eq!(outcome.outcomes().len(), 9);
    // (0,0) (1,0) (0,1) (1,1) belong to the first two ships
    assert_eq!(hits, 4);
    assert_eq!(board.move_count(), before + 4);
}

#[test]
fn test_strafing_run_is_vertical() {
    let log = EventLog::new();
    let mut board = ai_board(&log);
    charge(&mut board);
    let outcome = board
        .attempt_special_move(SpecialMove::StrafingRun, Coordinate::new(4, 2))
        .unwrap();
    let SpecialOutcome::Salvo(shots) = outcome else {
        panic!("strafing run returned {:?}", outcome);
    };
    let cells: Vec<_> = shots.iter().map(|&(c, _)| c).collect();
    assert_eq!(cells, (0..5).map(|y| Coordinate::new(4, y)).collect::<Vec<_>>());
    assert!(shots.iter().all(|&(_, o)| o == MoveOutcome::Hit));
    assert_eq!(board.ships_remaining(), 4);
}

#[test]
fn test_reveal_uncovers_hidden_ships_in_slot_order() {
    let log = EventLog::new();
    let mut board = ai_board(&log);
    board.set_ship_rendering(false);

    charge(&mut board);
    let outcome = board.attempt_special_move(SpecialMove::Reveal, Coordinate::new(9, 9));
    assert_eq!(outcome, Some(SpecialOutcome::Revealed(Some(ShipKind::PatrolBoat))));
    assert!(board.fleet().get(0).unwrap().is_revealed());
    assert!(!board.fleet().get(1).unwrap().is_revealed());
    assert_eq!(board.meter(), 0);

    board.set_ship_rendering(true);
    charge(&mut board);
    assert_eq!(
        board.attempt_special_move(SpecialMove::Reveal, Coordinate::new(9, 9)),
        Some(SpecialOutcome::Revealed(None))
    );
}

#[test]
fn test_cheat_move_finds_intact_cells() {
    let log = EventLog::new();
    let mut board = ai_board(&log);
    assert_eq!(board.cheat_move(), Some(Coordinate::new(0, 0)));
    board.enter_move(Coordinate::new(0, 0));
    assert_eq!(board.cheat_move(), Some(Coordinate::new(0, 1)));
    board.enter_move(Coordinate::new(0, 1));
    assert_eq!(board.cheat_move(), Some(Coordinate::new(1, 0)));
}

#[test]
fn test_manual_placement_rules() {
    let mut board = Board::with_fleet(FleetCollection::new(), Arc::new(EventLog::new()));
    let edge = Ship::new(Coordinate::new(5, 0), Direction::Right, 5, false).unwrap();
    assert_eq!(board.add_ship(edge), Err(BoardError::ShipOutOfBounds));
    let carrier = Ship::new(Coordinate::new(4, 0), Direction::Right, 5, false).unwrap();
    board.add_ship(carrier).unwrap();

    let off = Ship::new(Coordinate::new(7, 3), Direction::Right, 4, false).unwrap();
    assert_eq!(board.add_ship(off), Err(BoardError::ShipOutOfBounds));

    let crossing = Ship::new(Coordinate::new(6, 0), Direction::Down, 3, false).unwrap();
    assert_eq!(board.add_ship(crossing), Err(BoardError::ShipOverlaps));

    let moved = Ship::new(Coordinate::new(6, 1), Direction::Down, 3, false).unwrap();
    board.add_ship(moved.clone()).unwrap();
    assert!(board.remove_ship(&moved));
    assert!(!board.remove_ship(&moved));

    for (x, len) in [(0, 2), (1, 3), (2, 3), (3, 4)] {
        let ship = Ship::new(Coordinate::new(x, 5), Direction::Down, len, x == 2).unwrap();
        board.add_ship(ship).unwrap();
    }
    let extra = Ship::new(Coordinate::new(9, 9), Direction::Up, 2, false).unwrap();
    assert_eq!(board.add_ship(extra.clone()), Err(BoardError::FleetFull));

    board.start();
    assert_eq!(board.ships_remaining(), 5);
    assert_eq!(board.add_ship(extra), Err(BoardError::NotInSetup));
    assert!(!board.remove_ship(&moved));
}
