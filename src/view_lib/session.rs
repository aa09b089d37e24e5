// src/view_lib/session.rs
//
// The single context object the event loop hands every input to. It owns the
// triangulation and all view state; nothing else mutates either.

use glam::Vec2;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::graph_lib::{GraphError, SelectionError, Triangulation, Vertex, VertexId};
use crate::view_lib::camera::ViewTransform;
use crate::view_lib::command::Command;
use crate::view_lib::notice::NoticeBoard;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    Index,
    Color,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Index => DisplayMode::Color,
            DisplayMode::Color => DisplayMode::Index,
        }
    }
}

/// Two-click vertex selection started by `BeginVertexSelection`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Idle,
    AwaitingFirst,
    AwaitingSecond(VertexId),
}

pub struct Session {
    config: AppConfig,
    graph: Triangulation,
    view: ViewTransform,
    display_mode: DisplayMode,
    selection: Selection,
    drag_last: Option<Vec2>,
    visible_limit: Option<usize>,
    viewport: Vec2,
    notices: NoticeBoard,
    rng: StdRng,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut graph = Triangulation::new(config.graph.clone());
        graph.seed_triangle();
        let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
        Self {
            config,
            graph,
            view: ViewTransform::default(),
            display_mode: DisplayMode::Index,
            selection: Selection::Idle,
            drag_last: None,
            visible_limit: None,
            viewport,
            notices: NoticeBoard::default(),
            rng,
        }
    }

    pub fn graph(&self) -> &Triangulation { &self.graph }
    pub fn view(&self) -> &ViewTransform { &self.view }
    pub fn display_mode(&self) -> DisplayMode { self.display_mode }
    pub fn selection(&self) -> Selection { self.selection }
    pub fn visible_limit(&self) -> Option<usize> { self.visible_limit }
    pub fn notices(&self) -> &NoticeBoard { &self.notices }
    pub fn is_dragging(&self) -> bool { self.drag_last.is_some() }

    pub fn is_visible(&self, vertex: &Vertex) -> bool {
        self.visible_limit.map_or(true, |m| vertex.index <= m)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Applies a command, turning any refusal into a transient notice.
    pub fn dispatch(&mut self, command: Command) {
        debug!("dispatch {:?}", command);
        if let Err(e) = self.apply(command) {
            self.report(&e);
        }
    }

    pub fn apply(&mut self, command: Command) -> Result<(), GraphError> {
        match command {
            Command::SeedTriangle => {
                self.graph.seed_triangle();
                self.selection = Selection::Idle;
                self.visible_limit = None;
                Ok(())
            }
            Command::AddRandomVertex => self.graph.add_random_vertex(&mut self.rng).map(|_| ()),
            Command::BeginVertexSelection => {
                if !self.graph.is_seeded() {
                    return Err(GraphError::InvalidState);
                }
                self.selection = Selection::AwaitingFirst;
                Ok(())
            }
            Command::CancelSelection => {
                self.selection = Selection::Idle;
                Ok(())
            }
            Command::ToggleDisplayMode => {
                self.display_mode = self.display_mode.toggled();
                Ok(())
            }
            Command::ResetView => {
                self.view.reset();
                Ok(())
            }
            Command::ZoomIn => {
                self.view.zoom_by_notches(1.0, self.viewport / 2.0, &self.config.view);
                Ok(())
            }
            Command::ZoomOut => {
                self.view.zoom_by_notches(-1.0, self.viewport / 2.0, &self.config.view);
                Ok(())
            }
            Command::ShowUpTo(limit) => {
                self.visible_limit = limit;
                Ok(())
            }
        }
    }

    /// Left button down. While selecting, a press on a visible vertex is a pick;
    /// anywhere else it starts a drag.
    pub fn pointer_pressed(&mut self, screen: Vec2) {
        if self.selection != Selection::Idle {
            let world = self.view.screen_to_world(screen);
            if let Some(id) = self.graph.vertex_at(world, self.visible_limit) {
                if let Err(e) = self.pick(id) {
                    self.report(&e);
                }
                return;
            }
        }
        self.drag_last = Some(screen);
    }

    pub fn pointer_released(&mut self) {
        self.drag_last = None;
    }

    pub fn pointer_moved(&mut self, screen: Vec2) {
        if let Some(last) = self.drag_last {
            self.view.pan_by(screen - last);
            self.drag_last = Some(screen);
        }
    }

    pub fn wheel(&mut self, notches: f32, cursor: Vec2) {
        self.view.zoom_by_notches(notches, cursor, &self.config.view);
        debug!("zoom {:.3}", self.view.zoom);
    }

    pub fn update(&mut self, dt: f32) {
        self.notices.tick(dt);
    }

    fn pick(&mut self, id: VertexId) -> Result<(), GraphError> {
        match self.selection {
            Selection::Idle => Ok(()),
            Selection::AwaitingFirst => {
                if self.graph.is_on_periphery(id) {
                    self.selection = Selection::AwaitingSecond(id);
                    Ok(())
                } else {
                    self.selection = Selection::Idle;
                    Err(SelectionError::NotOnPeriphery(id).into())
                }
            }
            Selection::AwaitingSecond(vp) => {
                self.selection = Selection::Idle;
                let added = self.graph.add_vertex_between(vp, id)?;
                info!("user attached {}", added);
                Ok(())
            }
        }
    }

    fn report(&mut self, error: &GraphError) {
        warn!("{}", error);
        self.notices.push(error.to_string(), self.config.notice_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let config = AppConfig { rng_seed: Some(11), ..AppConfig::default() };
        Session::new(config)
    }

    fn screen_of(session: &Session, id: VertexId) -> Vec2 {
        let pos = session.graph().position(id).unwrap();
        session.view().world_to_screen(pos)
    }

    #[test]
    fn starts_seeded() {
        let s = session();
        assert_eq!(s.graph().vertices().len(), 3);
        assert_eq!(s.display_mode(), DisplayMode::Index);
    }

    #[test]
    fn toggling_twice_is_a_pure_view_change() {
        let mut s = session();
        s.dispatch(Command::AddRandomVertex);
        let before = s.graph().clone();
        s.dispatch(Command::ToggleDisplayMode);
        assert_eq!(s.display_mode(), DisplayMode::Color);
        s.dispatch(Command::ToggleDisplayMode);
        assert_eq!(s.display_mode(), DisplayMode::Index);
        assert_eq!(s.graph(), &before);
    }

    #[test]
    fn reset_view_after_wheel_and_drag() {
        let mut s = session();
        s.wheel(3.0, Vec2::new(200.0, 100.0));
        s.pointer_pressed(Vec2::new(10.0, 10.0));
        s.pointer_moved(Vec2::new(60.0, 90.0));
        s.pointer_released();
        assert_ne!(s.view().pan, Vec2::ZERO);
        s.dispatch(Command::ResetView);
        assert_eq!(s.view().zoom, 1.0);
        assert_eq!(s.view().pan, Vec2::ZERO);
    }

    #[test]
    fn drag_accumulates_pan() {
        let mut s = session();
        s.pointer_pressed(Vec2::new(0.0, 0.0));
        s.pointer_moved(Vec2::new(10.0, 5.0));
        s.pointer_moved(Vec2::new(25.0, -5.0));
        s.pointer_released();
        s.pointer_moved(Vec2::new(500.0, 500.0));
        assert_eq!(s.view().pan, Vec2::new(25.0, -5.0));
    }

    #[test]
    fn two_picks_attach_a_vertex() {
        let mut s = session();
        let p = s.graph().current_periphery().to_vec();
        s.dispatch(Command::BeginVertexSelection);
        s.pointer_pressed(screen_of(&s, p[0]));
        assert_eq!(s.selection(), Selection::AwaitingSecond(p[0]));
        s.pointer_pressed(screen_of(&s, p[1]));
        assert_eq!(s.selection(), Selection::Idle);
        assert_eq!(s.graph().vertices().len(), 4);
        assert!(!s.is_dragging());
    }

    #[test]
    fn picking_the_same_vertex_twice_cancels() {
        let mut s = session();
        let p = s.graph().current_periphery().to_vec();
        let before = s.graph().clone();
        s.dispatch(Command::BeginVertexSelection);
        s.pointer_pressed(screen_of(&s, p[0]));
        s.pointer_pressed(screen_of(&s, p[0]));
        assert_eq!(s.selection(), Selection::Idle);
        assert_eq!(s.graph(), &before);
        assert!(!s.notices().is_empty());
    }

    #[test]
    fn picking_an_interior_vertex_cancels() {
        let mut s = session();
        let p = s.graph().current_periphery().to_vec();
        s.apply(Command::BeginVertexSelection).unwrap();
        s.pointer_pressed(screen_of(&s, p[0]));
        s.pointer_pressed(screen_of(&s, p[1]));
        let now = s.graph().current_periphery().to_vec();
        s.graph.add_vertex_between(now[0], now[2]).unwrap();
        let interior = now[1];
        assert!(!s.graph().is_on_periphery(interior));

        s.apply(Command::BeginVertexSelection).unwrap();
        s.pointer_pressed(screen_of(&s, interior));
        assert_eq!(s.selection(), Selection::Idle);
    }

    #[test]
    fn escape_cancels_a_pending_selection() {
        let mut s = session();
        let p = s.graph().current_periphery().to_vec();
        let before = s.graph().clone();
        s.dispatch(Command::BeginVertexSelection);
        s.dispatch(Command::CancelSelection);
        assert_eq!(s.selection(), Selection::Idle);

        s.dispatch(Command::BeginVertexSelection);
        s.pointer_pressed(screen_of(&s, p[0]));
        assert_eq!(s.selection(), Selection::AwaitingSecond(p[0]));
        s.dispatch(Command::CancelSelection);
        assert_eq!(s.selection(), Selection::Idle);
        assert_eq!(s.graph(), &before);
        assert!(s.notices().is_empty());
    }

    #[test]
    fn interior_second_pick_cancels_with_notice() {
        let mut s = session();
        let p = s.graph().current_periphery().to_vec();
        s.graph.add_vertex_between(p[0], p[1]).unwrap();
        let now = s.graph().current_periphery().to_vec();
        s.graph.add_vertex_between(now[0], now[2]).unwrap();
        let interior = now[1];
        let first = s.graph().current_periphery()[0];
        let before = s.graph().clone();

        s.dispatch(Command::BeginVertexSelection);
        s.pointer_pressed(screen_of(&s, first));
        assert_eq!(s.selection(), Selection::AwaitingSecond(first));
        s.pointer_pressed(screen_of(&s, interior));
        assert_eq!(s.selection(), Selection::Idle);
        assert_eq!(s.graph(), &before);
        let texts: Vec<&str> = s.notices().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec![GraphError::from(SelectionError::NotOnPeriphery(interior)).to_string()]);
    }

    #[test]
    fn unplaceable_second_pick_cancels_with_notice() {
        let mut config = AppConfig { rng_seed: Some(11), ..AppConfig::default() };
        config.graph.placement_offset = 0.0;
        let mut s = Session::new(config);
        let p = s.graph().current_periphery().to_vec();
        let before = s.graph().clone();

        s.dispatch(Command::BeginVertexSelection);
        s.pointer_pressed(screen_of(&s, p[0]));
        s.pointer_pressed(screen_of(&s, p[1]));
        assert_eq!(s.selection(), Selection::Idle);
        assert_eq!(s.graph(), &before);
        let texts: Vec<&str> = s.notices().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec![GraphError::from(SelectionError::NoPlanarPosition(p[0], p[1])).to_string()]);
    }

    #[test]
    fn clicking_empty_space_while_selecting_drags() {
        let mut s = session();
        s.dispatch(Command::BeginVertexSelection);
        s.pointer_pressed(Vec2::new(5.0, 5.0));
        assert!(s.is_dragging());
        assert_eq!(s.selection(), Selection::AwaitingFirst);
    }

    #[test]
    fn hidden_vertices_cannot_be_picked() {
        let mut s = session();
        let p = s.graph().current_periphery().to_vec();
        s.dispatch(Command::ShowUpTo(Some(1)));
        s.dispatch(Command::BeginVertexSelection);
        s.pointer_pressed(screen_of(&s, p[1]));
        assert_eq!(s.selection(), Selection::AwaitingFirst);
        s.dispatch(Command::SeedTriangle);
        assert_eq!(s.visible_limit(), None);
        assert_eq!(s.selection(), Selection::Idle);
    }

    #[test]
    fn zoom_keys_step_about_viewport_center() {
        let mut s = session();
        s.dispatch(Command::ZoomIn);
        assert!((s.view().zoom - 1.1).abs() < 1e-6);
        s.dispatch(Command::ZoomOut);
        assert!((s.view().zoom - 1.0).abs() < 1e-6);
    }
}
