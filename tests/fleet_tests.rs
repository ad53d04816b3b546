use broadside::{BoardError, Coordinate, Direction, FleetCollection, Ship};

fn ship(x: i32, y: i32, direction: Direction, len: usize, submarine: bool) -> Ship {
    Ship::new(Coordinate::new(x, y), direction, len, submarine).unwrap()
}

#[test]
fn test_capacity_and_removal() {
    let mut fleet = FleetCollection::new();
    for (i, &len) in [2, 3, 3, 4, 5].iter().enumerate() {
        fleet
            .add(ship(i as i32, 0, Direction::Down, len, i == 2))
            .unwrap();
    }
    assert!(fleet.is_full());
    assert_eq!(fleet.len(), 5);
    assert_eq!(fleet.remaining(), 5);
    assert_eq!(
        fleet.add(ship(9, 0, Direction::Down, 2, false)).unwrap_err(),
        BoardError::FleetFull
    );

    // removal matches on length and submarine flag only
    let removed = fleet.remove(&ship(8, 8, Direction::Left, 3, true)).unwrap();
    assert!(removed.is_submarine());
    assert_eq!(removed.origin(), Coordinate::new(2, 0));
    assert_eq!(fleet.len(), 4);
    assert_eq!(fleet.remaining(), 4);
    assert!(fleet.get(2).is_none());
    assert!(fleet.remove(&ship(8, 8, Direction::Left, 3, true)).is_none());

    // the freed slot is refilled first
    fleet.add(ship(7, 0, Direction::Down, 3, true)).unwrap();
    assert_eq!(fleet.get(2).map(Ship::origin), Some(Coordinate::new(7, 0)));
}

#[test]
fn test_try_move_hits_and_sinks() {
    let mut fleet = FleetCollection::new();
    fleet.add(ship(0, 0, Direction::Right, 2, false)).unwrap();
    fleet.add(ship(0, 2, Direction::Down, 3, false)).unwrap();

    assert!(!fleet.try_move(Coordinate::new(5, 5), false));
    assert!(fleet.try_move(Coordinate::new(0, 0), true));
    assert_eq!(fleet.remaining(), 2);

    assert!(fleet.try_move(Coordinate::new(0, 0), false));
    assert!(fleet.try_move(Coordinate::new(1, 0), false));
    assert_eq!(fleet.remaining(), 1);
    assert!(fleet.get(0).unwrap().is_sunk());

    // sunk ships no longer take shots
    assert!(!fleet.try_move(Coordinate::new(1, 0), false));
    assert_eq!(fleet.remaining(), 1);

    for y in 2..5 {
        assert!(fleet.try_move(Coordinate::new(0, y), false));
    }
    assert!(fleet.is_empty());
}

#[test]
fn test_conflicts() {
    let mut fleet = FleetCollection::new();
    fleet.add(ship(2, 2, Direction::Right, 3, false)).unwrap();
    assert!(fleet.conflicts(&ship(3, 0, Direction::Down, 4, false)));
    assert!(!fleet.conflicts(&ship(5, 0, Direction::Down, 4, false)));
}
