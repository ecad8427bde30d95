use rand::rngs::StdRng;
use rand::SeedableRng;

use invaders::config::GameConfig;
use invaders::entities::{Edge, Entity, EntityId, IdAllocator, Ufo, UfoSpawner};

#[test]
fn spawns_exactly_at_the_interval() {
    let cfg = GameConfig::default();
    let mut spawner = UfoSpawner::new();
    let mut ids = IdAllocator::default();
    let mut rng = StdRng::seed_from_u64(42);

    assert!(spawner
        .check_spawn(&cfg, 9.999, None, &mut ids, &mut rng)
        .is_none());
    assert!((spawner.timer() - 9.999).abs() < 1e-4);

    let ufo = spawner
        .check_spawn(&cfg, 0.002, None, &mut ids, &mut rng)
        .expect("interval reached");
    assert_eq!(spawner.timer(), 0.0);

    let half = cfg.ufo.width / 2.0;
    if ufo.direction() > 0.0 {
        assert_eq!(ufo.x, -half, "left-edge UFO starts just off screen");
    } else {
        assert_eq!(ufo.x, cfg.canvas.width + half);
    }
    assert_eq!(ufo.y, cfg.canvas.height * cfg.ufo.altitude);
}

#[test]
fn timer_waits_while_a_ufo_is_flying() {
    let cfg = GameConfig::default();
    let mut spawner = UfoSpawner::new();
    let mut ids = IdAllocator::default();
    let mut rng = StdRng::seed_from_u64(7);

    let flying = Ufo::new(ids.next_id(), Edge::Left, &cfg);
    for _ in 0..20 {
        assert!(spawner
            .check_spawn(&cfg, 1.0, Some(&flying), &mut ids, &mut rng)
            .is_none());
    }
    assert_eq!(spawner.timer(), 0.0);
}

#[test]
fn both_edges_are_used() {
    let cfg = GameConfig::default();
    let mut spawner = UfoSpawner::new();
    let mut ids = IdAllocator::default();
    let mut rng = StdRng::seed_from_u64(42);

    let mut left = 0;
    let mut right = 0;
    for _ in 0..64 {
        let ufo = spawner
            .check_spawn(&cfg, cfg.ufo.spawn_interval, None, &mut ids, &mut rng)
            .expect("one per interval");
        if ufo.direction() > 0.0 {
            left += 1;
        } else {
            right += 1;
        }
    }
    assert!(left > 0 && right > 0, "left {left}, right {right}");
}

#[test]
fn ufo_leaves_play_past_the_far_edge() {
    let cfg = GameConfig::default();
    let mut ufo = Ufo::new(EntityId(0), Edge::Right, &cfg);
    assert_eq!(ufo.direction(), -1.0);

    // Starts at x 392 and leaves once past -64, at 100 px/s.
    for _ in 0..4 {
        ufo.update(1.0, cfg.canvas.width);
    }
    assert!(ufo.is_active());
    ufo.update(1.0, cfg.canvas.width);
    assert!(!ufo.is_active());
}
