//! Sprite lookup with placeholder fallback
//!
//! Renderers ask for a drawable per snapshot element. When the host has no
//! art for a sprite the resolver hands back a primitive shape instead and
//! warns once for that sprite.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::sim::{ActorKind, ActorView, CarPaint, Direction, PuffView, Tile};

/// Logical sprite names, matching the art files shipped with the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpriteName {
    Car,
    CarRed,
    Truck,
    Log,
    Bird,
    Snake,
    Frog,
    FrogLeft,
    FrogRight,
    FrogRear,
    Grass,
    Water,
    Road,
    Goal,
    Start,
    RoadMark,
    UglyGrass,
}

impl SpriteName {
    pub const ALL: [SpriteName; 17] = [
        SpriteName::Car,
        SpriteName::CarRed,
        SpriteName::Truck,
        SpriteName::Log,
        SpriteName::Bird,
        SpriteName::Snake,
        SpriteName::Frog,
        SpriteName::FrogLeft,
        SpriteName::FrogRight,
        SpriteName::FrogRear,
        SpriteName::Grass,
        SpriteName::Water,
        SpriteName::Road,
        SpriteName::Goal,
        SpriteName::Start,
        SpriteName::RoadMark,
        SpriteName::UglyGrass,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpriteName::Car => "car",
            SpriteName::CarRed => "carRed",
            SpriteName::Truck => "truck",
            SpriteName::Log => "log",
            SpriteName::Bird => "bird",
            SpriteName::Snake => "snake",
            SpriteName::Frog => "frog",
            SpriteName::FrogLeft => "frogLeft",
            SpriteName::FrogRight => "frogRight",
            SpriteName::FrogRear => "frogRear",
            SpriteName::Grass => "grass",
            SpriteName::Water => "water",
            SpriteName::Road => "road",
            SpriteName::Goal => "goal",
            SpriteName::Start => "start",
            SpriteName::RoadMark => "road_mark",
            SpriteName::UglyGrass => "uglyGrass",
        }
    }

    pub fn is_tile(self) -> bool {
        matches!(
            self,
            SpriteName::Grass
                | SpriteName::Water
                | SpriteName::Road
                | SpriteName::Goal
                | SpriteName::Start
                | SpriteName::RoadMark
                | SpriteName::UglyGrass
        )
    }

    /// Relative path of the art file
    pub fn path(self) -> String {
        let dir = if self.is_tile() { "tiles" } else { "sprites" };
        format!("assets/{}/{}.png", dir, self.as_str())
    }
}

/// Host-provided art
pub trait SpriteSource {
    type Handle: Clone;

    fn sprite(&self, name: SpriteName) -> Option<Self::Handle>;
}

impl<H: Clone> SpriteSource for HashMap<SpriteName, H> {
    type Handle = H;

    fn sprite(&self, name: SpriteName) -> Option<H> {
        self.get(&name).cloned()
    }
}

/// A source with no art at all; everything draws as placeholders
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSprites;

impl SpriteSource for NoSprites {
    type Handle = ();

    fn sprite(&self, _name: SpriteName) -> Option<()> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shape {
    Rect,
    Oval,
    RoundRect,
}

/// What to draw for one element
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable<H> {
    Sprite { handle: H, flip_x: bool },
    Placeholder { shape: Shape, fill: Rgb, outline: bool },
}

/// Colour for kill puffs (alpha comes from the puff itself)
pub const PUFF_COLOR: Rgb = Rgb(255, 255, 200);

const GRASS_GREEN: Rgb = Rgb(72, 160, 72);

fn placeholder<H>(shape: Shape, fill: Rgb, outline: bool) -> Drawable<H> {
    Drawable::Placeholder {
        shape,
        fill,
        outline,
    }
}

fn sprite_placeholder<H>(name: SpriteName) -> Drawable<H> {
    match name {
        SpriteName::Car => placeholder(Shape::Rect, Rgb(184, 80, 80), true),
        SpriteName::CarRed => placeholder(Shape::Rect, Rgb(210, 48, 48), true),
        SpriteName::Truck => placeholder(Shape::Rect, Rgb(84, 132, 196), true),
        SpriteName::Log => placeholder(Shape::Rect, Rgb(128, 88, 48), true),
        SpriteName::Bird => placeholder(Shape::Oval, Rgb(255, 220, 120), false),
        SpriteName::Snake => placeholder(Shape::RoundRect, Rgb(80, 200, 120), false),
        SpriteName::Frog | SpriteName::FrogLeft | SpriteName::FrogRight | SpriteName::FrogRear => {
            placeholder(Shape::Oval, Rgb(56, 196, 96), false)
        }
        SpriteName::Goal | SpriteName::Grass | SpriteName::Start => {
            placeholder(Shape::Rect, GRASS_GREEN, false)
        }
        SpriteName::Water => placeholder(Shape::Rect, Rgb(40, 88, 152), false),
        SpriteName::Road => placeholder(Shape::Rect, Rgb(56, 56, 56), false),
        SpriteName::UglyGrass => placeholder(Shape::Rect, Rgb(120, 160, 80), false),
        SpriteName::RoadMark => placeholder(Shape::Rect, Rgb(236, 214, 96), false),
    }
}

fn tile_sprite(tile: Tile) -> Option<SpriteName> {
    match tile {
        Tile::Goal => Some(SpriteName::Goal),
        Tile::Water => Some(SpriteName::Water),
        Tile::Road => Some(SpriteName::Road),
        Tile::Grass => Some(SpriteName::Grass),
        Tile::UglyGrass => Some(SpriteName::UglyGrass),
        Tile::Start => Some(SpriteName::Start),
        Tile::Hud | Tile::Blank => None,
    }
}

/// Maps snapshot elements to drawables, warning once per missing sprite
pub struct SpriteResolver<S: SpriteSource> {
    source: S,
    warned: RefCell<HashSet<SpriteName>>,
}

impl<S: SpriteSource> SpriteResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            warned: RefCell::new(HashSet::new()),
        }
    }

    fn lookup(&self, name: SpriteName) -> Option<S::Handle> {
        let handle = self.source.sprite(name);
        if handle.is_none() && self.warned.borrow_mut().insert(name) {
            log::warn!("Missing sprite {}, drawing a placeholder", name.path());
        }
        handle
    }

    fn drawable(&self, name: SpriteName, flip_x: bool) -> Drawable<S::Handle> {
        match self.lookup(name) {
            Some(handle) => Drawable::Sprite { handle, flip_x },
            None => sprite_placeholder(name),
        }
    }

    /// Frog art for a facing. Hopping toward the goal shows the front view,
    /// but only when the rear view also exists. The spawn pose and hopping
    /// back show the rear view, but only when the front view exists. This is
    /// the shipped game's table.
    fn frog(&self, facing: Direction, hopped: bool) -> Drawable<S::Handle> {
        let handle = match (hopped, facing) {
            (true, Direction::Left) => self
                .lookup(SpriteName::FrogLeft)
                .or_else(|| self.lookup(SpriteName::Frog)),
            (true, Direction::Right) => self
                .lookup(SpriteName::FrogRight)
                .or_else(|| self.lookup(SpriteName::Frog)),
            (true, Direction::Up) => self
                .lookup(SpriteName::FrogRear)
                .and_then(|_| self.lookup(SpriteName::Frog)),
            (false, _) | (true, Direction::Down) => self
                .lookup(SpriteName::Frog)
                .and_then(|_| self.lookup(SpriteName::FrogRear)),
        };
        match handle {
            Some(handle) => Drawable::Sprite {
                handle,
                flip_x: false,
            },
            None => sprite_placeholder(SpriteName::Frog),
        }
    }

    pub fn actor(&self, view: &ActorView) -> Drawable<S::Handle> {
        match view.kind {
            ActorKind::Car(CarPaint::Normal) => self.drawable(SpriteName::Car, view.flip_x),
            ActorKind::Car(CarPaint::Red) => self.drawable(SpriteName::CarRed, view.flip_x),
            ActorKind::Truck => self.drawable(SpriteName::Truck, view.flip_x),
            ActorKind::Log => self.drawable(SpriteName::Log, view.flip_x),
            ActorKind::Bird => self.drawable(SpriteName::Bird, view.flip_x),
            ActorKind::Snake => self.drawable(SpriteName::Snake, view.flip_x),
            ActorKind::Avatar { facing, hopped } => self.frog(facing, hopped),
            // Projectiles never have art
            ActorKind::Projectile => placeholder(Shape::Oval, Rgb(255, 240, 120), false),
        }
    }

    /// `None` for rows drawn as plain background (HUD strip, blank rows)
    pub fn tile(&self, tile: Tile) -> Option<Drawable<S::Handle>> {
        tile_sprite(tile).map(|name| self.drawable(name, false))
    }

    pub fn road_mark(&self) -> Drawable<S::Handle> {
        self.drawable(SpriteName::RoadMark, false)
    }

    /// Kill puffs never have art. Returns the shape and its alpha.
    pub fn puff(&self, view: &PuffView) -> (Drawable<S::Handle>, u8) {
        (placeholder(Shape::Oval, PUFF_COLOR, false), view.alpha)
    }
}
