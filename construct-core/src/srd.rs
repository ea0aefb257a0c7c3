//! Read-only 5e rules reference.
//!
//! Static lookup tables for race traits, class features, skills, and
//! spells, consumed by the prompt compiler. Built once at first use and
//! never mutated.

use std::sync::LazyLock;

/// A playable race and its defining traits.
#[derive(Debug, Clone)]
pub struct RaceEntry {
    pub name: &'static str,
    pub traits: Vec<&'static str>,
}

/// A character class and its level 1 features.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    pub name: &'static str,
    pub features: Vec<&'static str>,
}

/// A skill, its governing ability, and a one-line description.
#[derive(Debug, Clone)]
pub struct SkillEntry {
    pub name: &'static str,
    pub ability: &'static str,
    pub description: &'static str,
}

/// A spell with level, school, and a one-line description.
#[derive(Debug, Clone)]
pub struct SpellEntry {
    pub name: &'static str,
    pub level: u8,
    pub school: &'static str,
    pub description: &'static str,
}

/// The complete rules-reference dataset.
pub struct RulesReference {
    races: Vec<RaceEntry>,
    classes: Vec<ClassEntry>,
    skills: Vec<SkillEntry>,
    spells: Vec<SpellEntry>,
}

static RULES: LazyLock<RulesReference> = LazyLock::new(RulesReference::build);

impl RulesReference {
    /// Get the process-wide rules reference.
    pub fn global() -> &'static RulesReference {
        &RULES
    }

    /// Find a race by name (case-insensitive).
    pub fn find_race(&self, name: &str) -> Option<&RaceEntry> {
        self.races.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Find a class by name (case-insensitive).
    pub fn find_class(&self, name: &str) -> Option<&ClassEntry> {
        self.classes
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Every skill whose name appears as a case-insensitive substring of
    /// the given text, in dataset order. Empty text matches nothing.
    pub fn mentioned_skills(&self, text: &str) -> Vec<&SkillEntry> {
        let lower = text.to_lowercase();
        self.skills
            .iter()
            .filter(|s| lower.contains(&s.name.to_lowercase()))
            .collect()
    }

    /// Every spell whose name appears as a case-insensitive substring of
    /// the given text, in dataset order. Empty text matches nothing.
    pub fn mentioned_spells(&self, text: &str) -> Vec<&SpellEntry> {
        let lower = text.to_lowercase();
        self.spells
            .iter()
            .filter(|s| lower.contains(&s.name.to_lowercase()))
            .collect()
    }

    pub fn races(&self) -> &[RaceEntry] {
        &self.races
    }

    pub fn classes(&self) -> &[ClassEntry] {
        &self.classes
    }

    pub fn skills(&self) -> &[SkillEntry] {
        &self.skills
    }

    pub fn spells(&self) -> &[SpellEntry] {
        &self.spells
    }

    fn build() -> RulesReference {
        RulesReference {
            races: vec![
                RaceEntry {
                    name: "Human",
                    traits: vec!["+1 to all ability scores", "Extra language"],
                },
                RaceEntry {
                    name: "Elf",
                    traits: vec!["Darkvision", "Keen Senses", "Fey Ancestry", "Trance"],
                },
                RaceEntry {
                    name: "Dwarf",
                    traits: vec![
                        "Darkvision",
                        "Dwarven Resilience",
                        "Stonecunning",
                        "Tool Proficiency",
                    ],
                },
                RaceEntry {
                    name: "Halfling",
                    traits: vec!["Lucky", "Brave", "Halfling Nimbleness"],
                },
                RaceEntry {
                    name: "Tiefling",
                    traits: vec!["Darkvision", "Hellish Resistance", "Infernal Legacy"],
                },
                RaceEntry {
                    name: "Dragonborn",
                    traits: vec!["Draconic Ancestry", "Breath Weapon", "Damage Resistance"],
                },
            ],
            classes: vec![
                ClassEntry {
                    name: "Fighter",
                    features: vec!["Fighting Style", "Second Wind"],
                },
                ClassEntry {
                    name: "Wizard",
                    features: vec!["Spellcasting", "Arcane Recovery"],
                },
                ClassEntry {
                    name: "Rogue",
                    features: vec!["Expertise", "Sneak Attack", "Thieves' Cant"],
                },
                ClassEntry {
                    name: "Cleric",
                    features: vec!["Spellcasting", "Divine Domain"],
                },
                ClassEntry {
                    name: "Paladin",
                    features: vec!["Divine Sense", "Lay on Hands"],
                },
                ClassEntry {
                    name: "Warlock",
                    features: vec!["Otherworldly Patron", "Pact Magic"],
                },
            ],
            skills: vec![
                SkillEntry {
                    name: "Acrobatics",
                    ability: "Dexterity",
                    description: "Stay on your feet in tricky situations, tumble, or balance.",
                },
                SkillEntry {
                    name: "Animal Handling",
                    ability: "Wisdom",
                    description: "Calm, control, or intuit the intentions of an animal.",
                },
                SkillEntry {
                    name: "Arcana",
                    ability: "Intelligence",
                    description: "Recall lore about spells, magic items, and planes.",
                },
                SkillEntry {
                    name: "Athletics",
                    ability: "Strength",
                    description: "Climb, jump, swim, or grapple.",
                },
                SkillEntry {
                    name: "Deception",
                    ability: "Charisma",
                    description: "Convincingly hide the truth with words or actions.",
                },
                SkillEntry {
                    name: "History",
                    ability: "Intelligence",
                    description: "Recall lore about historical events, people, and kingdoms.",
                },
                SkillEntry {
                    name: "Insight",
                    ability: "Wisdom",
                    description: "Determine the true intentions of a creature.",
                },
                SkillEntry {
                    name: "Intimidation",
                    ability: "Charisma",
                    description: "Influence others through threats and hostile presence.",
                },
                SkillEntry {
                    name: "Investigation",
                    ability: "Intelligence",
                    description: "Look for clues and make deductions from them.",
                },
                SkillEntry {
                    name: "Medicine",
                    ability: "Wisdom",
                    description: "Stabilize the dying or diagnose an illness.",
                },
                SkillEntry {
                    name: "Nature",
                    ability: "Intelligence",
                    description: "Recall lore about terrain, plants, animals, and weather.",
                },
                SkillEntry {
                    name: "Perception",
                    ability: "Wisdom",
                    description: "Spot, hear, or otherwise detect the presence of something.",
                },
                SkillEntry {
                    name: "Performance",
                    ability: "Charisma",
                    description: "Delight an audience with music, dance, or storytelling.",
                },
                SkillEntry {
                    name: "Persuasion",
                    ability: "Charisma",
                    description: "Influence others with tact and good nature.",
                },
                SkillEntry {
                    name: "Religion",
                    ability: "Intelligence",
                    description: "Recall lore about deities, rites, and holy symbols.",
                },
                SkillEntry {
                    name: "Sleight of Hand",
                    ability: "Dexterity",
                    description: "Plant something on someone or conceal an object.",
                },
                SkillEntry {
                    name: "Stealth",
                    ability: "Dexterity",
                    description: "Conceal yourself or move silently.",
                },
                SkillEntry {
                    name: "Survival",
                    ability: "Wisdom",
                    description: "Follow tracks, hunt, guide through the wilds.",
                },
            ],
            spells: vec![
                SpellEntry {
                    name: "Fire Bolt",
                    level: 0,
                    school: "Evocation",
                    description: "Hurl a mote of fire at a creature or object.",
                },
                SpellEntry {
                    name: "Mage Hand",
                    level: 0,
                    school: "Conjuration",
                    description: "A spectral hand manipulates objects at a distance.",
                },
                SpellEntry {
                    name: "Aid",
                    level: 2,
                    school: "Abjuration",
                    description: "Bolster up to three allies with toughness and resolve.",
                },
                SpellEntry {
                    name: "Cure Wounds",
                    level: 1,
                    school: "Evocation",
                    description: "A touched creature regains hit points.",
                },
                SpellEntry {
                    name: "Magic Missile",
                    level: 1,
                    school: "Evocation",
                    description: "Three darts of force strike unerringly.",
                },
                SpellEntry {
                    name: "Shield",
                    level: 1,
                    school: "Abjuration",
                    description: "An invisible barrier grants +5 AC until your next turn.",
                },
                SpellEntry {
                    name: "Sleep",
                    level: 1,
                    school: "Enchantment",
                    description: "Send creatures into a magical slumber.",
                },
                SpellEntry {
                    name: "Thunderwave",
                    level: 1,
                    school: "Evocation",
                    description: "A wave of thunderous force sweeps out from you.",
                },
                SpellEntry {
                    name: "Charm Person",
                    level: 1,
                    school: "Enchantment",
                    description: "A humanoid regards you as a friendly acquaintance.",
                },
                SpellEntry {
                    name: "Healing Word",
                    level: 1,
                    school: "Evocation",
                    description: "A word of power restores hit points at range.",
                },
                SpellEntry {
                    name: "Invisibility",
                    level: 2,
                    school: "Illusion",
                    description: "A touched creature becomes invisible.",
                },
                SpellEntry {
                    name: "Fireball",
                    level: 3,
                    school: "Evocation",
                    description: "A bright streak blossoms into an explosion of flame.",
                },
            ],
        }
    }
}
