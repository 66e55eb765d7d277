use std::collections::HashSet;

use crate::types::{ButtonAction, PedestalView, PickupIndex, PlayerView, RoomKind, TextColor, Vec2};

/// Everything the arbiter needs from the game engine. Queries are
/// snapshots for the current frame; effects are fire-and-forget.
pub trait Host {
    fn room_kind(&self) -> RoomKind;

    /// Full roster, in engine order.
    fn players(&self) -> Vec<PlayerView>;

    fn collectibles(&self) -> Vec<PedestalView>;

    fn is_action_pressed(&self, action: ButtonAction, controller_index: u32) -> bool;

    fn world_to_screen(&self, position: Vec2) -> Vec2;

    fn render_text(&mut self, text: &str, position: Vec2, color: TextColor);

    fn animate_happy(&mut self, entity_index: i32);

    fn animate_sad(&mut self, entity_index: i32);
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedText {
    pub text: String,
    pub position: Vec2,
    pub color: TextColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Animation {
    Happy(i32),
    Sad(i32),
}

/// In-memory engine stand-in. Records every effect so callers can inspect
/// what would have been drawn or animated.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    pub room_kind: RoomKind,
    pub players: Vec<PlayerView>,
    pub pedestals: Vec<PedestalView>,
    pub camera: Vec2,
    pressed: HashSet<(u32, ButtonAction)>,
    rendered: Vec<RenderedText>,
    animations: Vec<Animation>,
}

impl MemoryHost {
    pub fn new(room_kind: RoomKind, players: Vec<PlayerView>) -> Self {
        Self {
            room_kind,
            players,
            pedestals: Vec::new(),
            camera: Vec2::default(),
            pressed: HashSet::new(),
            rendered: Vec::new(),
            animations: Vec::new(),
        }
    }

    /// Moves to a new room: pedestals and held inputs do not carry over.
    pub fn enter_room(&mut self, room_kind: RoomKind) {
        self.room_kind = room_kind;
        self.pedestals.clear();
        self.pressed.clear();
    }

    pub fn spawn(&mut self, pedestal: PedestalView) {
        self.pedestals.push(pedestal);
    }

    pub fn remove_pedestal(&mut self, pickup_index: PickupIndex) -> Option<PedestalView> {
        let position = self
            .pedestals
            .iter()
            .position(|pedestal| pedestal.pickup_index == pickup_index)?;
        Some(self.pedestals.remove(position))
    }

    pub fn player_mut(&mut self, entity_index: i32) -> Option<&mut PlayerView> {
        self.players
            .iter_mut()
            .find(|player| player.entity_index == entity_index)
    }

    pub fn press(&mut self, controller_index: u32, action: ButtonAction) {
        self.pressed.insert((controller_index, action));
    }

    pub fn release_all(&mut self, controller_index: u32) {
        self.pressed
            .retain(|(controller, _)| *controller != controller_index);
    }

    pub fn take_rendered(&mut self) -> Vec<RenderedText> {
        std::mem::take(&mut self.rendered)
    }

    pub fn take_animations(&mut self) -> Vec<Animation> {
        std::mem::take(&mut self.animations)
    }
}

impl Host for MemoryHost {
    fn room_kind(&self) -> RoomKind {
        self.room_kind
    }

    fn players(&self) -> Vec<PlayerView> {
        self.players.clone()
    }

    fn collectibles(&self) -> Vec<PedestalView> {
        self.pedestals.clone()
    }

    fn is_action_pressed(&self, action: ButtonAction, controller_index: u32) -> bool {
        self.pressed.contains(&(controller_index, action))
    }

    fn world_to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(position.x - self.camera.x, position.y - self.camera.y)
    }

    fn render_text(&mut self, text: &str, position: Vec2, color: TextColor) {
        self.rendered.push(RenderedText {
            text: text.to_string(),
            position,
            color,
        });
    }

    fn animate_happy(&mut self, entity_index: i32) {
        self.animations.push(Animation::Happy(entity_index));
    }

    fn animate_sad(&mut self, entity_index: i32) {
        self.animations.push(Animation::Sad(entity_index));
    }
}
