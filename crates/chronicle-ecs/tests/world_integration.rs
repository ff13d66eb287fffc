use chronicle_ecs::prelude::*;

#[test]
fn three_entity_query_intersection_scenario() {
    let mut world = World::new();
    world.register_component_kind(ComponentKind::Position);
    world.register_component_kind(ComponentKind::Health);
    world.register_component_kind(ComponentKind::Profession);

    let e1 = world.create_entity();
    world
        .attach(e1, Component::Position(Position { x: 0.0, y: 0.0 }))
        .unwrap();
    world
        .attach(e1, Component::Health(Health { value: 10.0 }))
        .unwrap();

    let e2 = world.create_entity();
    world
        .attach(e2, Component::Position(Position { x: 1.0, y: 1.0 }))
        .unwrap();
    world
        .attach(
            e2,
            Component::Profession(Profession {
                title: "farmer".to_owned(),
            }),
        )
        .unwrap();

    let e3 = world.create_entity();
    world
        .attach(e3, Component::Position(Position { x: 2.0, y: 2.0 }))
        .unwrap();
    world
        .attach(e3, Component::Health(Health { value: 5.0 }))
        .unwrap();
    world
        .attach(
            e3,
            Component::Profession(Profession {
                title: "smith".to_owned(),
            }),
        )
        .unwrap();

    let mut ab = world.query(&[ComponentKind::Position, ComponentKind::Health]);
    ab.sort();
    let mut expected_ab = vec![e1, e3];
    expected_ab.sort();
    assert_eq!(ab, expected_ab);

    let mut ac = world.query(&[ComponentKind::Position, ComponentKind::Profession]);
    ac.sort();
    let mut expected_ac = vec![e2, e3];
    expected_ac.sort();
    assert_eq!(ac, expected_ac);

    let abc = world.query(&[
        ComponentKind::Position,
        ComponentKind::Health,
        ComponentKind::Profession,
    ]);
    assert_eq!(abc, vec![e3]);
}

#[test]
fn deceased_entities_remain_queryable() {
    let mut world = World::new();
    world.register_component_kind(ComponentKind::Position);
    world.register_component_kind(ComponentKind::Deceased);

    let e = world.create_entity();
    world
        .attach(e, Component::Position(Position { x: 0.0, y: 0.0 }))
        .unwrap();
    world
        .attach(
            e,
            Component::Deceased(Deceased {
                tick: 3,
                cause: "plague".to_owned(),
            }),
        )
        .unwrap();

    assert!(world.is_deceased(e));
    assert_eq!(world.query(&[ComponentKind::Position]), vec![e]);
}

#[test]
fn world_survives_a_save_load_roundtrip() {
    let mut world = World::new();
    world.register_component_kind(ComponentKind::Resources);
    let e = world.create_entity();
    world
        .attach(
            e,
            Component::Resources(Resources {
                gold: 100.0,
                food: 50.0,
                materials: 25.0,
            }),
        )
        .unwrap();

    let snapshot = WorldSnapshot::capture(&world);
    let bytes = snapshot.to_json().unwrap();
    let loaded = WorldSnapshot::from_json(&bytes).unwrap();

    assert_eq!(
        loaded.world.get(e, ComponentKind::Resources),
        world.get(e, ComponentKind::Resources)
    );
}
