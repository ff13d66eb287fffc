//! The component catalog: a closed enumeration of component kinds, each
//! pairing a discriminant ([`ComponentKind`]) with a flat data record
//! carried in the [`Component`] tagged union.
//!
//! Components are pure data — they never carry behavior. Every kind's
//! fields are limited to scalars, strings, ordered sequences, and key-value
//! maps with scalar keys, so that the whole catalog serializes uniformly.
//!
//! This catalog realizes a representative 37-kind slice of a much larger
//! intended catalog (see `DESIGN.md`); extending it is a mechanical
//! three-step addition (new [`ComponentKind`] variant, new [`Component`]
//! variant, one match arm in [`Component::kind`]), not a design change.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

// ---------------------------------------------------------------------------
// ComponentKind
// ---------------------------------------------------------------------------

/// The discriminant naming a component's kind. Closed, known at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    // -- geography --------------------------------------------------------
    Position,
    Region,
    Territory,
    Site,
    // -- social structure ---------------------------------------------------
    FactionMembership,
    FactionRelations,
    Government,
    Population,
    // -- individual traits --------------------------------------------------
    Identity,
    Age,
    Health,
    Personality,
    Profession,
    Relationship,
    Deceased,
    // -- culture --------------------------------------------------------
    CulturalIdentity,
    Tradition,
    Language,
    // -- religion --------------------------------------------------------
    Deity,
    Faith,
    ReligiousInstitution,
    // -- knowledge --------------------------------------------------------
    Knowledge,
    Skill,
    Memory,
    // -- objects / artifacts ------------------------------------------------
    Artifact,
    Inventory,
    Ownership,
    // -- military --------------------------------------------------------
    MilitaryForce,
    War,
    Siege,
    // -- economic --------------------------------------------------------
    Resources,
    TradeRoute,
    Market,
    // -- ecology --------------------------------------------------------
    Ecosystem,
    Climate,
    // -- event annotation / generic ------------------------------------------
    Annotation,
    MagicAffinity,
}

impl ComponentKind {
    /// All kinds in this catalog, in declaration order.
    pub const ALL: &'static [ComponentKind] = &[
        ComponentKind::Position,
        ComponentKind::Region,
        ComponentKind::Territory,
        ComponentKind::Site,
        ComponentKind::FactionMembership,
        ComponentKind::FactionRelations,
        ComponentKind::Government,
        ComponentKind::Population,
        ComponentKind::Identity,
        ComponentKind::Age,
        ComponentKind::Health,
        ComponentKind::Personality,
        ComponentKind::Profession,
        ComponentKind::Relationship,
        ComponentKind::Deceased,
        ComponentKind::CulturalIdentity,
        ComponentKind::Tradition,
        ComponentKind::Language,
        ComponentKind::Deity,
        ComponentKind::Faith,
        ComponentKind::ReligiousInstitution,
        ComponentKind::Knowledge,
        ComponentKind::Skill,
        ComponentKind::Memory,
        ComponentKind::Artifact,
        ComponentKind::Inventory,
        ComponentKind::Ownership,
        ComponentKind::MilitaryForce,
        ComponentKind::War,
        ComponentKind::Siege,
        ComponentKind::Resources,
        ComponentKind::TradeRoute,
        ComponentKind::Market,
        ComponentKind::Ecosystem,
        ComponentKind::Climate,
        ComponentKind::Annotation,
        ComponentKind::MagicAffinity,
    ];
}

// ---------------------------------------------------------------------------
// Per-kind data records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub climate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub owner: Option<EntityId>,
    pub region: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionMembership {
    pub faction: EntityId,
    pub rank: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionRelations {
    pub allies: Vec<EntityId>,
    pub enemies: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Government {
    pub form: String,
    pub stability: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub count: u64,
    pub growth_rate: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub birth_tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Age {
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub traits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profession {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub target: EntityId,
    pub kind: String,
    pub strength: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deceased {
    pub tick: u64,
    pub cause: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalIdentity {
    pub culture: EntityId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tradition {
    pub name: String,
    pub strength: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deity {
    pub domain: String,
    pub favor: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faith {
    pub deity: Option<EntityId>,
    pub devotion: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReligiousInstitution {
    pub name: String,
    pub influence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Knowledge {
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub description: String,
    pub significance: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub power: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ownership {
    pub owner: EntityId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilitaryForce {
    pub strength: u32,
    pub morale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct War {
    pub attacker: EntityId,
    pub defender: EntityId,
    pub started_tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Siege {
    pub target: EntityId,
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub gold: f64,
    pub food: f64,
    pub materials: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRoute {
    pub partner: EntityId,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub goods: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ecosystem {
    pub biome: String,
    pub health: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Climate {
    pub temperature: f32,
    pub precipitation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicAffinity {
    pub school: String,
    pub potency: f32,
}

// ---------------------------------------------------------------------------
// Component: the tagged union
// ---------------------------------------------------------------------------

/// A component value. Pure data, tagged by [`ComponentKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Component {
    Position(Position),
    Region(Region),
    Territory(Territory),
    Site(Site),
    FactionMembership(FactionMembership),
    FactionRelations(FactionRelations),
    Government(Government),
    Population(Population),
    Identity(Identity),
    Age(Age),
    Health(Health),
    Personality(Personality),
    Profession(Profession),
    Relationship(Relationship),
    Deceased(Deceased),
    CulturalIdentity(CulturalIdentity),
    Tradition(Tradition),
    Language(Language),
    Deity(Deity),
    Faith(Faith),
    ReligiousInstitution(ReligiousInstitution),
    Knowledge(Knowledge),
    Skill(Skill),
    Memory(Memory),
    Artifact(Artifact),
    Inventory(Inventory),
    Ownership(Ownership),
    MilitaryForce(MilitaryForce),
    War(War),
    Siege(Siege),
    Resources(Resources),
    TradeRoute(TradeRoute),
    Market(Market),
    Ecosystem(Ecosystem),
    Climate(Climate),
    Annotation(Annotation),
    MagicAffinity(MagicAffinity),
}

impl Component {
    /// The [`ComponentKind`] discriminant of this value.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Position(_) => ComponentKind::Position,
            Component::Region(_) => ComponentKind::Region,
            Component::Territory(_) => ComponentKind::Territory,
            Component::Site(_) => ComponentKind::Site,
            Component::FactionMembership(_) => ComponentKind::FactionMembership,
            Component::FactionRelations(_) => ComponentKind::FactionRelations,
            Component::Government(_) => ComponentKind::Government,
            Component::Population(_) => ComponentKind::Population,
            Component::Identity(_) => ComponentKind::Identity,
            Component::Age(_) => ComponentKind::Age,
            Component::Health(_) => ComponentKind::Health,
            Component::Personality(_) => ComponentKind::Personality,
            Component::Profession(_) => ComponentKind::Profession,
            Component::Relationship(_) => ComponentKind::Relationship,
            Component::Deceased(_) => ComponentKind::Deceased,
            Component::CulturalIdentity(_) => ComponentKind::CulturalIdentity,
            Component::Tradition(_) => ComponentKind::Tradition,
            Component::Language(_) => ComponentKind::Language,
            Component::Deity(_) => ComponentKind::Deity,
            Component::Faith(_) => ComponentKind::Faith,
            Component::ReligiousInstitution(_) => ComponentKind::ReligiousInstitution,
            Component::Knowledge(_) => ComponentKind::Knowledge,
            Component::Skill(_) => ComponentKind::Skill,
            Component::Memory(_) => ComponentKind::Memory,
            Component::Artifact(_) => ComponentKind::Artifact,
            Component::Inventory(_) => ComponentKind::Inventory,
            Component::Ownership(_) => ComponentKind::Ownership,
            Component::MilitaryForce(_) => ComponentKind::MilitaryForce,
            Component::War(_) => ComponentKind::War,
            Component::Siege(_) => ComponentKind::Siege,
            Component::Resources(_) => ComponentKind::Resources,
            Component::TradeRoute(_) => ComponentKind::TradeRoute,
            Component::Market(_) => ComponentKind::Market,
            Component::Ecosystem(_) => ComponentKind::Ecosystem,
            Component::Climate(_) => ComponentKind::Climate,
            Component::Annotation(_) => ComponentKind::Annotation,
            Component::MagicAffinity(_) => ComponentKind::MagicAffinity,
        }
    }

    /// Borrow the [`Position`] payload, if this is a `Position` component.
    pub fn as_position(&self) -> Option<&Position> {
        match self {
            Component::Position(p) => Some(p),
            _ => None,
        }
    }

    /// Borrow the [`Deceased`] payload, if this is a `Deceased` component.
    pub fn as_deceased(&self) -> Option<&Deceased> {
        match self {
            Component::Deceased(d) => Some(d),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
