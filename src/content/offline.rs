//! Built-in content that needs no generative service.
//!
//! Deterministic: the same request always yields the same deck, which keeps
//! headless games and session tests reproducible.

use async_trait::async_trait;

use super::narrator::{NarrationEvent, Narrator};
use super::provider::{ContentProvider, ContentRequest, ProviderError, RoundContent};
use crate::core::GameMode;

static CHEESES: [&str; 24] = [
    "Brie", "Camembert", "Cheddar", "Gouda", "Edam", "Gruyère", "Emmental", "Roquefort",
    "Stilton", "Gorgonzola", "Feta", "Halloumi", "Manchego", "Pecorino", "Parmesan", "Mozzarella",
    "Ricotta", "Comté", "Havarti", "Taleggio", "Fontina", "Raclette", "Munster", "Limburger",
];

static ISOTOPES: [&str; 24] = [
    "Uranium-235", "Uranium-238", "Plutonium-239", "Cobalt-60", "Carbon-14", "Iodine-131",
    "Cesium-137", "Strontium-90", "Tritium", "Radon-222", "Radium-226", "Thorium-232",
    "Americium-241", "Polonium-210", "Technetium-99m", "Krypton-85", "Xenon-133", "Potassium-40",
    "Californium-252", "Curium-244", "Neptunium-237", "Lead-210", "Bismuth-209", "Francium-223",
];

static DUMPSTER_FINDS: [&str; 24] = [
    "A single rollerblade", "Half a wedding cake", "Tax returns from 1994", "A sad mattress",
    "Nine hundred coat hangers", "A slightly used tuba", "Someone's diary", "A box of googly eyes",
    "An ex's hoodie", "Expired glow sticks", "A haunted doll", "Forty rubber ducks",
    "A broken karaoke machine", "Moldy pizza crusts", "A mannequin head", "Unopened fan mail",
    "A raccoon with opinions", "Jury duty summons", "Three left shoes", "A pet rock named Steve",
    "Wet cardboard", "A lava lamp", "Unused gym membership", "A cursed VHS tape",
];

static RED_OBJECTS: [&str; 24] = [
    "Apple", "Fire truck", "Stop sign", "Strawberry", "Cherry", "Tomato", "Ladybug", "Brick",
    "Rose", "Lobster", "Ruby", "Chili", "Cardinal", "Postbox", "Radish", "Lipstick",
    "Blood", "Mars", "Fox", "Poppy", "Lava", "Ketchup", "Raspberry", "Crab",
];

type Category = (&'static str, &'static [&'static str]);

static CLASSIC: [Category; 2] = [("TYPES OF CHEESE", &CHEESES), ("NUCLEAR ISOTOPES", &ISOTOPES)];
static PARTY: [Category; 1] = [("THINGS FOUND IN A DUMPSTER", &DUMPSTER_FINDS)];
static TIMED: [Category; 1] = [("RED OBJECTS", &RED_OBJECTS)];

fn catalog(mode: &GameMode) -> &'static [Category] {
    match mode {
        GameMode::Party => &PARTY,
        GameMode::Timed => &TIMED,
        _ => &CLASSIC,
    }
}

/// Canned categories and game-master lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineContent;

impl OfflineContent {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// The deck for a request. Rounds cycle through the mode's categories.
    #[must_use]
    pub fn round_content(&self, request: &ContentRequest) -> RoundContent {
        if let Some(topic) = request.topic() {
            let items = (1..=request.target_count)
                .map(|i| format!("{} #{}", topic, i))
                .collect();
            return RoundContent::new(topic, items);
        }

        let choices = catalog(&request.mode);
        let (category, items) = choices[request.round.saturating_sub(1) as usize % choices.len()];
        RoundContent::new(
            category,
            items
                .iter()
                .take(request.target_count)
                .map(|s| (*s).to_string())
                .collect(),
        )
    }
}

#[async_trait]
impl ContentProvider for OfflineContent {
    async fn generate_round_content(
        &self,
        request: &ContentRequest,
    ) -> Result<RoundContent, ProviderError> {
        Ok(self.round_content(request))
    }
}

#[async_trait]
impl Narrator for OfflineContent {
    async fn commentary(&self, event: &NarrationEvent) -> Result<String, ProviderError> {
        let line = match event {
            NarrationEvent::Start => "Welcome, test subjects. Try not to disappoint me.".to_string(),
            NarrationEvent::Safe { player, .. } => {
                format!("{player} survives. For now. How dull.")
            }
            NarrationEvent::Death { player, detail } => {
                format!("{detail}. Bold choice, {player}. Also your last one.")
            }
            NarrationEvent::Win { player } => {
                format!("{player} wins. Enjoy it. I will remember this.")
            }
        };
        Ok(line)
    }
}
