use fleetwar::{
    place_fleet_randomly, place_missing_ships_randomly, random_placement, Board, BoardConfig,
    Coord, FleetError, Orientation, PlacementErrorKind, Ship, ShipSpec, FLEET, PLACEMENT_ATTEMPTS,
    TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn occupied(board: &Board) -> usize {
    let size = board.size();
    (0..size * size)
        .filter(|i| board.cell(i / size, i % size).unwrap().ship().is_some())
        .count()
}

#[test]
fn test_place_fleet_randomly_no_overlap() {
    let mut board = Board::standard();
    let mut rng = SmallRng::seed_from_u64(42);
    let ids = place_fleet_randomly(&mut board, &FLEET, &mut rng).unwrap();

    assert_eq!(ids.len(), FLEET.len());
    assert_eq!(board.ship_count(), FLEET.len());
    assert!(board.is_fleet_complete(&FLEET));
    assert_eq!(
        occupied(&board),
        TOTAL_SHIP_CELLS,
        "all ships should be placed without overlap"
    );
}

#[test]
fn test_place_fleet_replaces_existing_ships() {
    let mut board = Board::standard();
    board
        .place_ship(Ship::new("Dinghy", 2), 0, 0, Orientation::Horizontal)
        .unwrap();
    let mut rng = SmallRng::seed_from_u64(7);
    place_fleet_randomly(&mut board, &FLEET, &mut rng).unwrap();
    assert_eq!(board.ship_named("Dinghy"), None);
    assert_eq!(board.ship_count(), FLEET.len());
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let mut a = Board::standard();
    let mut b = Board::standard();
    place_fleet_randomly(&mut a, &FLEET, &mut SmallRng::seed_from_u64(99)).unwrap();
    place_fleet_randomly(&mut b, &FLEET, &mut SmallRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_place_missing_keeps_manual_ships() {
    let mut board = Board::standard();
    let carrier = board
        .try_place_spec(FLEET[0], 9, 0, Orientation::Horizontal)
        .unwrap();
    let destroyer = board
        .try_place_spec(FLEET[4], 0, 9, Orientation::Vertical)
        .unwrap();
    let mut rng = SmallRng::seed_from_u64(3);

    let added = place_missing_ships_randomly(&mut board, &FLEET, &mut rng).unwrap();
    assert_eq!(added.len(), 3);
    assert!(board.is_fleet_complete(&FLEET));
    assert_eq!(board.placement(carrier).unwrap().origin, Coord::new(9, 0));
    assert_eq!(board.placement(destroyer).unwrap().origin, Coord::new(0, 9));
    assert_eq!(occupied(&board), TOTAL_SHIP_CELLS);

    // nothing left to place
    let added = place_missing_ships_randomly(&mut board, &FLEET, &mut rng).unwrap();
    assert!(added.is_empty());
}

#[test]
fn test_exhaustion_is_reported_and_rolled_back() {
    static CROWDED: [ShipSpec; 4] = [
        ShipSpec::new("A", 3),
        ShipSpec::new("B", 3),
        ShipSpec::new("C", 3),
        ShipSpec::new("D", 3),
    ];
    let mut board = Board::new(BoardConfig::new(3, 3).unwrap());
    let mut rng = SmallRng::seed_from_u64(1);
    let err = place_fleet_randomly(&mut board, &CROWDED, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        FleetError::PlacementExhausted { attempts, .. } if attempts == PLACEMENT_ATTEMPTS
    ));
    assert_eq!(board.ship_count(), 0);
    assert_eq!(occupied(&board), 0);
}

#[test]
fn test_missing_exhaustion_keeps_manual_ships() {
    let mut board = Board::new(BoardConfig::new(3, 3).unwrap());
    for row in 0..3 {
        board
            .place_ship(Ship::new(format!("Row{row}"), 3), row, 0, Orientation::Horizontal)
            .unwrap();
    }
    let fleet = [ShipSpec::new("Extra", 1)];
    let mut rng = SmallRng::seed_from_u64(1);
    let err = place_missing_ships_randomly(&mut board, &fleet, &mut rng).unwrap_err();
    assert_eq!(
        err,
        FleetError::PlacementExhausted {
            ship: "Extra".into(),
            attempts: PLACEMENT_ATTEMPTS
        }
    );
    assert_eq!(board.ship_count(), 3);
}

#[test]
fn test_canonical_fleet_rejected_on_classic_board() {
    let mut board = Board::new(BoardConfig::classic());
    let mut rng = SmallRng::seed_from_u64(5);
    let err = place_fleet_randomly(&mut board, &FLEET, &mut rng).unwrap_err();
    assert_eq!(
        err,
        FleetError::Rejected {
            ship: "Carrier".into(),
            reason: PlacementErrorKind::InvalidShipSpec,
        }
    );
    assert_eq!(board.ship_count(), 0);
}

#[test]
fn test_invalid_ship_rolls_back_earlier_ships() {
    static OVERSIZED: [ShipSpec; 3] = [
        ShipSpec::new("Destroyer", 2),
        ShipSpec::new("Cruiser", 3),
        ShipSpec::new("Dreadnought", 6),
    ];
    let mut board = Board::standard();
    let mut rng = SmallRng::seed_from_u64(9);
    let err = place_fleet_randomly(&mut board, &OVERSIZED, &mut rng).unwrap_err();
    assert_eq!(
        err,
        FleetError::Rejected {
            ship: "Dreadnought".into(),
            reason: PlacementErrorKind::InvalidShipSpec,
        }
    );
    assert_eq!(board.ship_count(), 0);
    assert_eq!(occupied(&board), 0);
}

#[test]
fn test_random_placement_is_valid() {
    let board = Board::standard();
    let ship = Ship::new("Carrier", 5);
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..20 {
        let (r, c, o) = random_placement(&board, &ship, &mut rng, PLACEMENT_ATTEMPTS).unwrap();
        assert!(board.validate_placement(&ship, r, c, o));
    }
    assert_eq!(random_placement(&board, &ship, &mut rng, 0), None);

    let classic = Board::new(BoardConfig::classic());
    assert_eq!(
        random_placement(&classic, &ship, &mut rng, PLACEMENT_ATTEMPTS),
        None
    );
}
