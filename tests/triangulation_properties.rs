// tests/triangulation_properties.rs
use glam::Vec2;
use planar_graph_viz::config::AppConfig;
use planar_graph_viz::graph_lib::{GraphError, SelectionError, Triangulation, TriangulationConfig};
use planar_graph_viz::view_lib::{Command, DisplayMode, Session};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded() -> Triangulation {
    let mut graph = Triangulation::new(TriangulationConfig::default());
    graph.seed_triangle();
    graph
}

#[test]
fn mixed_growth_keeps_every_invariant() {
    let mut graph = seeded();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut attached = 0;

    for step in 0..150 {
        let n = graph.current_periphery().len();
        if step % 3 == 0 {
            let i = rng.gen_range(0..n);
            let j = (i + rng.gen_range(1..n.min(4))) % n;
            let vp = graph.current_periphery()[i];
            let vq = graph.current_periphery()[j];
            let forward = (j + n - i) % n + 1;
            let backward = n + 2 - forward;
            let before = graph.clone();
            match graph.add_vertex_between(vp, vq) {
                Ok(id) => {
                    attached += 1;
                    let periphery = graph.current_periphery();
                    assert_eq!(periphery[1], id);
                    let k = if periphery[0] == vp {
                        assert_eq!(periphery[2], vq);
                        forward
                    } else {
                        assert_eq!((periphery[0], periphery[2]), (vq, vp));
                        backward
                    };
                    assert_eq!(periphery.len(), n - k + 3);
                }
                Err(e) => {
                    assert_eq!(e, GraphError::InvalidSelection(SelectionError::NoPlanarPosition(vp, vq)));
                    assert_eq!(graph, before);
                }
            }
        } else {
            let before = graph.clone();
            match graph.add_random_vertex(&mut rng) {
                Ok(_) => attached += 1,
                Err(e) => {
                    assert_eq!(e, GraphError::NoAttachmentSite);
                    assert_eq!(graph, before);
                }
            }
        }
        graph.validate().unwrap();
        let v = graph.vertices().len();
        let e = graph.edges().len();
        assert_eq!(graph.faces().len(), e + 1 - v);
    }
    assert_eq!(graph.vertices().len(), 3 + attached);
}

#[test]
fn adjacent_picks_grow_periphery_by_one_in_either_order() {
    let mut graph = seeded();
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..30 {
        graph.add_random_vertex(&mut rng).unwrap();
    }
    for step in 0..20 {
        let n = graph.current_periphery().len();
        let i = rng.gen_range(0..n);
        let a = graph.current_periphery()[i];
        let b = graph.current_periphery()[(i + 1) % n];
        let (vp, vq) = if step % 2 == 0 { (a, b) } else { (b, a) };
        if graph.add_vertex_between(vp, vq).is_ok() {
            assert_eq!(graph.current_periphery().len(), n + 1);
        }
        graph.validate().unwrap();
    }
}

#[test]
fn display_indices_follow_insertion_order() {
    let mut graph = seeded();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        graph.add_random_vertex(&mut rng).unwrap();
    }
    let labels: Vec<usize> = graph.vertices().iter().map(|v| v.index).collect();
    assert_eq!(labels, (1..=23).collect::<Vec<_>>());
}

#[test]
fn refused_selection_leaves_graph_untouched() {
    let mut graph = seeded();
    let before = graph.clone();
    let v = graph.current_periphery()[1];
    assert!(matches!(graph.add_vertex_between(v, v), Err(GraphError::InvalidSelection(_))));
    assert_eq!(graph, before);
}

#[test]
fn session_toggle_and_reset_do_not_touch_the_model() {
    let mut session = Session::new(AppConfig { rng_seed: Some(9), ..AppConfig::default() });
    session.dispatch(Command::AddRandomVertex);
    let model = session.graph().clone();

    session.dispatch(Command::ToggleDisplayMode);
    session.dispatch(Command::ToggleDisplayMode);
    assert_eq!(session.display_mode(), DisplayMode::Index);

    session.wheel(3.0, Vec2::new(120.0, 80.0));
    session.pointer_pressed(Vec2::new(5.0, 5.0));
    session.pointer_moved(Vec2::new(40.0, 25.0));
    session.pointer_released();
    session.dispatch(Command::ResetView);
    assert_eq!(session.view().zoom, 1.0);
    assert_eq!(session.view().pan, Vec2::ZERO);
    assert_eq!(session.graph(), &model);
}

#[test]
fn zoom_is_clamped_and_anchored_at_cursor() {
    let config = AppConfig { rng_seed: Some(1), ..AppConfig::default() };
    let (min_zoom, max_zoom) = (config.view.min_zoom, config.view.max_zoom);
    let mut session = Session::new(config);
    let cursor = Vec2::new(300.0, 200.0);
    let anchor = session.view().screen_to_world(cursor);

    session.wheel(100.0, cursor);
    assert!((session.view().zoom - max_zoom).abs() < 1e-4);
    let moved = session.view().screen_to_world(cursor);
    assert!((moved - anchor).length() < 1e-3);

    session.wheel(-200.0, cursor);
    assert!((session.view().zoom - min_zoom).abs() < 1e-4);
}
