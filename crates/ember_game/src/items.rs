//! Item kinds, the per-kind data table and the generic factory.
//!
//! One table entry per kind replaces per-kind construction code: sprite,
//! radius, mass, optional animation, optional growth transform and
//! optional spread, with the original game's exact numeric constants.

use crate::components::{
    layers, Animation, Force, Minion, Object, Position, Sprite, SpriteKey, Spread, Transform,
    Velocity,
};
use ember_core::ecs::{Entity, World};
use ember_core::math::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

/// Closed set of item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    None,
    Coal,
    SoulSeed,
    SoulSapling,
    SoulPlant,
    RedSeed,
    RedSapling,
    RedPlant,
    GreenSeed,
    GreenSapling,
    GreenPlant,
    BlueSeed,
    BlueSapling,
    BluePlant,
    GoldPlant,
    MadPlant,
    Minion,
}

impl Item {
    /// The sapling a settled seed turns into.
    pub fn sapling(self) -> Option<Item> {
        match self {
            Item::SoulSeed => Some(Item::SoulSapling),
            Item::RedSeed => Some(Item::RedSapling),
            Item::GreenSeed => Some(Item::GreenSapling),
            Item::BlueSeed => Some(Item::BlueSapling),
            _ => None,
        }
    }

    pub fn is_seed(self) -> bool {
        self.sapling().is_some()
    }

    /// Plants that can fill a pending order when burned.
    pub fn is_order_plant(self) -> bool {
        matches!(
            self,
            Item::RedPlant | Item::GreenPlant | Item::BluePlant | Item::GoldPlant
        )
    }
}

/// Animation descriptor for the data table.
#[derive(Debug, Clone, Copy)]
pub struct AnimSpec {
    pub frames: u32,
    pub frame_time: f32,
    pub looped: bool,
}

/// Static per-kind data.
#[derive(Debug, Clone, Copy)]
pub struct ItemSpec {
    pub radius: f32,
    pub mass: f32,
    pub solid: bool,
    pub sprite: SpriteKey,
    pub animation: Option<AnimSpec>,
    pub transform: Option<(Item, f32)>,
    pub spread: Option<(Item, f32)>,
}

const SAPLING_ANIM: AnimSpec = AnimSpec {
    frames: 4,
    frame_time: 0.25,
    looped: false,
};

const PLANT_ANIM: AnimSpec = AnimSpec {
    frames: 3,
    frame_time: 0.2,
    looped: false,
};

const fn seed(sprite: SpriteKey) -> ItemSpec {
    ItemSpec {
        radius: 4.0,
        mass: 1.0,
        solid: true,
        sprite,
        animation: None,
        transform: None,
        spread: None,
    }
}

const fn sapling(sprite: SpriteKey, into: Item, duration: f32) -> ItemSpec {
    ItemSpec {
        radius: 12.0,
        mass: 1.0,
        solid: true,
        sprite,
        animation: Some(SAPLING_ANIM),
        transform: Some((into, duration)),
        spread: None,
    }
}

const fn plant(sprite: SpriteKey) -> ItemSpec {
    ItemSpec {
        radius: 20.0,
        mass: 1.0,
        solid: true,
        sprite,
        animation: Some(PLANT_ANIM),
        transform: None,
        spread: None,
    }
}

/// Look up the static spec for a kind. `Item::None` has no spec.
pub fn spec(item: Item) -> ItemSpec {
    match item {
        Item::Coal => ItemSpec {
            radius: 15.0,
            mass: 1.0,
            solid: true,
            sprite: SpriteKey::Coal,
            animation: None,
            transform: None,
            spread: None,
        },
        Item::SoulSeed => seed(SpriteKey::SoulSeed),
        Item::SoulSapling => sapling(SpriteKey::SoulSapling, Item::SoulPlant, 13.0),
        Item::SoulPlant => plant(SpriteKey::SoulPlant),
        Item::RedSeed => seed(SpriteKey::RedSeed),
        Item::RedSapling => sapling(SpriteKey::RedSapling, Item::RedPlant, 9.0),
        Item::RedPlant => plant(SpriteKey::RedPlant),
        Item::GreenSeed => seed(SpriteKey::GreenSeed),
        Item::GreenSapling => sapling(SpriteKey::GreenSapling, Item::GreenPlant, 26.0),
        Item::GreenPlant => plant(SpriteKey::GreenPlant),
        Item::BlueSeed => seed(SpriteKey::BlueSeed),
        Item::BlueSapling => sapling(SpriteKey::BlueSapling, Item::BluePlant, 17.0),
        Item::BluePlant => ItemSpec {
            transform: Some((Item::GoldPlant, 17.0)),
            ..plant(SpriteKey::BluePlant)
        },
        Item::GoldPlant => plant(SpriteKey::GoldPlant),
        Item::MadPlant => ItemSpec {
            radius: 17.0,
            mass: 1.0,
            solid: true,
            sprite: SpriteKey::MadPlant,
            animation: Some(PLANT_ANIM),
            transform: None,
            spread: Some((Item::MadPlant, 3.0)),
        },
        Item::Minion => ItemSpec {
            radius: 13.0,
            mass: 1.0,
            solid: false,
            sprite: SpriteKey::Minion,
            animation: Some(AnimSpec {
                frames: 3,
                frame_time: 0.2,
                looped: true,
            }),
            transform: None,
            spread: None,
        },
        Item::None => ItemSpec {
            radius: 0.0,
            mass: 1.0,
            solid: false,
            sprite: SpriteKey::Coal,
            animation: None,
            transform: None,
            spread: None,
        },
    }
}

/// Top speed for free-moving items, from the original tuning.
pub const ITEM_MAX_SPEED: f32 = 300.0;

/// Chance (percent) for the chute to produce a large coal lump.
const LARGE_COAL_PERCENT: u32 = 20;
const LARGE_COAL_RADIUS: f32 = 23.0;
const LARGE_COAL_MASS: f32 = 2.0;

/// Create an item entity of the given kind at a position.
///
/// Coal randomizes its rotation and has a chance to come out large and
/// heavy; minions get their roaming tag. All other variation comes from
/// the data table.
pub fn spawn_item(world: &mut World, item: Item, position: Vec2, rng: &mut StdRng) -> Entity {
    let mut spec = spec(item);
    let mut rotation = 0.0;
    if item == Item::Coal {
        rotation = rng.gen::<f32>() * std::f32::consts::TAU;
        if rng.gen_range(0..100) < LARGE_COAL_PERCENT {
            spec.radius = LARGE_COAL_RADIUS;
            spec.mass = LARGE_COAL_MASS;
            spec.sprite = SpriteKey::CoalLarge;
        }
    }

    let entity = world.create();
    let attach = (|| -> Result<(), ember_core::ecs::WorldError> {
        world.attach(entity, Position::new(position))?;
        world.attach(entity, Velocity::new(ITEM_MAX_SPEED))?;
        world.attach(entity, Force::new(spec.mass))?;

        let mut object = Object::new(item, spec.radius);
        object.is_solid = spec.solid;
        object.transform = spec
            .transform
            .map(|(into, duration)| Transform {
                into,
                timer: duration,
            });
        object.spread = spec.spread.map(|(kind, interval)| Spread {
            kind,
            timer: interval,
        });
        world.attach(entity, object)?;

        let mut sprite = Sprite::new(spec.sprite, layers::OBJECTS);
        sprite.rotation = rotation;
        world.attach(entity, sprite)?;

        if let Some(anim) = spec.animation {
            world.attach(
                entity,
                Animation {
                    frames: anim.frames,
                    frame_time: anim.frame_time,
                    elapsed: 0.0,
                    looped: anim.looped,
                },
            )?;
        }
        if item == Item::Minion {
            world.attach(entity, Minion)?;
        }
        Ok(())
    })();
    debug_assert!(attach.is_ok(), "factory attached to a just-created entity");
    entity
}
