use lifetime_traffic_core::{
    Command, Event, FrameIndex, Itinerary, OccupantColor, OccupantId, Path, Position,
};
use lifetime_traffic_world::{self as world, query, OccupantState, World};

const COLOR: OccupantColor = OccupantColor::from_rgb(0xc8, 0x2a, 0x36);

fn path_of(len: usize, offset: f64) -> Path {
    (0..len)
        .map(|step| Position::on_ground(offset + step as f64, 0.0))
        .collect()
}

fn admit(world: &mut World, path: Path) -> Vec<Event> {
    let itinerary = Itinerary::new(vec![
        path.get(0).unwrap_or_default(),
        path.positions().last().copied().unwrap_or_default(),
    ]);
    let mut events = Vec::new();
    world::apply(
        world,
        Command::AdmitOccupant {
            itinerary,
            path,
            color: COLOR,
        },
        &mut events,
    );
    events
}

fn tick(world: &mut World, frame: u64) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Tick {
            frame: FrameIndex::new(frame),
        },
        &mut events,
    );
    events
}

#[test]
fn admission_allocates_sequential_ids_and_reports_origin() {
    let mut world = World::new();

    let first = admit(&mut world, path_of(3, 10.0));
    let second = admit(&mut world, path_of(3, 20.0));

    assert_eq!(
        first,
        vec![Event::OccupantAdmitted {
            occupant: OccupantId::new(0),
            origin: Position::on_ground(10.0, 0.0),
            color: COLOR,
        }]
    );
    assert!(matches!(
        second.as_slice(),
        [Event::OccupantAdmitted { occupant, .. }] if *occupant == OccupantId::new(1)
    ));

    let population = query::population(&world);
    assert_eq!(population.active, 2);
    assert_eq!(population.admitted, 2);
}

#[test]
fn cursor_advances_once_per_tick_and_retires_on_exact_tick() {
    let mut world = World::new();
    let _ = admit(&mut world, path_of(3, 0.0));
    let occupant = OccupantId::new(0);

    for frame in 0..3_u64 {
        let before = query::occupant_view(&world)
            .into_vec()
            .into_iter()
            .next()
            .expect("occupant active before final tick");
        assert_eq!(before.cursor, frame as usize);
        assert_eq!(before.path_len, 3);

        let events = tick(&mut world, frame);
        let advanced: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                Event::OccupantAdvanced { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        assert_eq!(advanced, vec![Position::on_ground(frame as f64, 0.0)]);

        let retired = events
            .iter()
            .any(|event| matches!(event, Event::OccupantRetired { .. }));
        if frame < 2 {
            assert!(!retired, "retired early on frame {frame}");
            assert_eq!(
                query::occupant_state(&world, occupant),
                Some(OccupantState::Active)
            );
        } else {
            assert!(retired, "must retire on the tick the path is exhausted");
            assert_eq!(query::occupant_state(&world, occupant), None);
        }
    }

    assert!(query::occupant_view(&world).is_empty());
    assert_eq!(query::last_frame(&world), Some(FrameIndex::new(2)));
}

#[test]
fn retiring_neighbours_does_not_skip_survivors() {
    let mut world = World::new();
    let _ = admit(&mut world, path_of(1, 0.0));
    let _ = admit(&mut world, path_of(1, 10.0));
    let _ = admit(&mut world, path_of(2, 20.0));
    let _ = admit(&mut world, path_of(1, 30.0));

    let events = tick(&mut world, 0);
    let advanced: Vec<OccupantId> = events
        .iter()
        .filter_map(|event| match event {
            Event::OccupantAdvanced { occupant, .. } => Some(*occupant),
            _ => None,
        })
        .collect();
    let retired: Vec<OccupantId> = events
        .iter()
        .filter_map(|event| match event {
            Event::OccupantRetired { occupant } => Some(*occupant),
            _ => None,
        })
        .collect();

    assert_eq!(
        advanced,
        (0..4).map(OccupantId::new).collect::<Vec<_>>(),
        "every occupant advances exactly once"
    );
    assert_eq!(
        retired,
        vec![OccupantId::new(0), OccupantId::new(1), OccupantId::new(3)]
    );

    let survivors: Vec<_> = query::occupant_view(&world)
        .iter()
        .map(|snapshot| (snapshot.id, snapshot.cursor))
        .collect();
    assert_eq!(survivors, vec![(OccupantId::new(2), 1)]);

    let events = tick(&mut world, 1);
    assert!(events.contains(&Event::OccupantRetired {
        occupant: OccupantId::new(2)
    }));
    assert_eq!(query::population(&world).active, 0);
}

#[test]
fn tick_reports_time_then_footprints_then_population() {
    let mut world = World::new();
    let _ = admit(&mut world, path_of(2, 5.0));

    let events = tick(&mut world, 7);
    assert_eq!(
        events,
        vec![
            Event::TimeAdvanced {
                frame: FrameIndex::new(7)
            },
            Event::OccupantAdvanced {
                occupant: OccupantId::new(0),
                position: Position::on_ground(5.0, 0.0),
                color: COLOR,
            },
            Event::PopulationChanged {
                active: 1,
                admitted: 1,
            },
        ]
    );

    let events = tick(&mut world, 8);
    assert_eq!(
        events.last(),
        Some(&Event::PopulationChanged {
            active: 0,
            admitted: 1,
        })
    );
}

#[test]
fn empty_path_retires_without_a_footprint() {
    let mut world = World::new();
    let _ = admit(&mut world, Path::default());

    let events = tick(&mut world, 0);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::OccupantAdvanced { .. })));
    assert!(events.contains(&Event::OccupantRetired {
        occupant: OccupantId::new(0)
    }));
}

#[test]
fn itinerary_is_queryable_while_active() {
    let mut world = World::new();
    let _ = admit(&mut world, path_of(2, 1.0));

    let itinerary = query::itinerary(&world, OccupantId::new(0)).expect("active occupant");
    assert_eq!(itinerary.first(), Some(Position::on_ground(1.0, 0.0)));
    assert!(query::itinerary(&world, OccupantId::new(9)).is_none());
}
