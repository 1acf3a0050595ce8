//! End-to-end link and unlink flows against an in-memory host.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use cq_core::{ItemPayload, SentenceSlot, SkillLevel};
use cq_engine::{
    ActorRecord, CreationEngine, DocumentStore, EmbeddedSummary, EngineConfig, HostError,
    HostResult, ItemLookup, JournalDocument,
};

// --- host mocks ---

#[derive(Default)]
struct MemoryDocuments(HashMap<String, JournalDocument>);

impl MemoryDocuments {
    fn with(mut self, document: JournalDocument) -> Self {
        self.0.insert(document.id.clone(), document);
        self
    }
}

#[async_trait]
impl DocumentStore for MemoryDocuments {
    async fn document(&self, id: &str) -> HostResult<JournalDocument> {
        self.0
            .get(id)
            .cloned()
            .ok_or_else(|| HostError::DocumentNotFound(id.to_string()))
    }
}

#[derive(Default)]
struct MemoryItems {
    world: HashMap<String, ItemPayload>,
}

impl MemoryItems {
    fn with(mut self, payload: ItemPayload) -> Self {
        self.world.insert(payload.id.clone(), payload);
        self
    }
}

#[async_trait]
impl ItemLookup for MemoryItems {
    async fn item(&self, id: &str) -> HostResult<ItemPayload> {
        self.world
            .get(id)
            .cloned()
            .ok_or_else(|| HostError::ItemNotFound(id.to_string()))
    }

    async fn pack_item(&self, pack: &str, _id: &str) -> HostResult<ItemPayload> {
        Err(HostError::PackNotFound(pack.to_string()))
    }
}

#[derive(Default)]
struct ActorState {
    fields: HashMap<String, Value>,
    embedded: Vec<ItemPayload>,
    update_log: Vec<String>,
    delete_calls: Vec<Vec<String>>,
    create_calls: Vec<Vec<ItemPayload>>,
}

/// A character sheet that remembers every write.
struct MemoryActor {
    tier: u8,
    state: Mutex<ActorState>,
}

impl MemoryActor {
    fn new(tier: u8) -> Self {
        Self {
            tier,
            state: Mutex::new(ActorState::default()),
        }
    }

    fn field(&self, path: &str) -> Value {
        self.state
            .lock()
            .unwrap()
            .fields
            .get(path)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn update_log(&self) -> Vec<String> {
        self.state.lock().unwrap().update_log.clone()
    }

    fn embedded_names(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.embedded.iter().map(|p| p.name.clone()).collect()
    }

    fn embedded_named(&self, name: &str) -> Option<ItemPayload> {
        let state = self.state.lock().unwrap();
        state.embedded.iter().find(|p| p.name == name).cloned()
    }

    fn delete_calls(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().delete_calls.clone()
    }

    fn create_calls(&self) -> Vec<Vec<ItemPayload>> {
        self.state.lock().unwrap().create_calls.clone()
    }
}

#[async_trait]
impl ActorRecord for MemoryActor {
    fn tier(&self) -> u8 {
        self.tier
    }

    fn sentence_slot(&self, slot: SentenceSlot) -> String {
        let path = format!("basic.{}", slot.field());
        self.state
            .lock()
            .unwrap()
            .fields
            .get(&path)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    }

    fn embedded_items(&self) -> Vec<EmbeddedSummary> {
        let state = self.state.lock().unwrap();
        state
            .embedded
            .iter()
            .map(|p| EmbeddedSummary::new(p.id.clone(), p.type_name.clone()))
            .collect()
    }

    async fn update(&self, path: &str, value: Value) -> HostResult<()> {
        let mut state = self.state.lock().unwrap();
        state.update_log.push(path.to_string());
        state.fields.insert(path.to_string(), value);
        Ok(())
    }

    async fn create_embedded(&self, items: Vec<ItemPayload>) -> HostResult<()> {
        let mut state = self.state.lock().unwrap();
        state.create_calls.push(items.clone());
        state.embedded.extend(items);
        Ok(())
    }

    async fn delete_embedded(&self, ids: Vec<String>) -> HostResult<()> {
        let mut state = self.state.lock().unwrap();
        state.embedded.retain(|p| !ids.contains(&p.id));
        state.delete_calls.push(ids);
        Ok(())
    }
}

// --- fixtures ---

fn journal(id: &str, name: &str, lines: &[&str]) -> JournalDocument {
    let content: String = lines.iter().map(|line| format!("<p>{line}</p>")).collect();
    JournalDocument::new(id, name, content)
}

fn skill(id: &str, name: &str) -> ItemPayload {
    ItemPayload::new(id, name, "skill", json!({ "skillLevel": "Practiced" }))
}

fn ability(id: &str, name: &str) -> ItemPayload {
    ItemPayload::new(id, name, "ability", json!({ "tier": 1 }))
}

fn equipment(id: &str, name: &str) -> ItemPayload {
    ItemPayload::new(id, name, "equipment", json!({ "quantity": 1 }))
}

fn artifact(id: &str, name: &str) -> ItemPayload {
    ItemPayload::new(id, name, "artifact", json!({ "level": "1d6" }))
}

// --- flows ---

#[tokio::test]
async fn linking_a_creation_journal_rewrites_the_whole_sheet() {
    let documents = MemoryDocuments::default().with(journal(
        "j1",
        "Clever",
        &["@descriptor", "@might 16 1", "@speed +2", "@effort 2"],
    ));
    let engine = CreationEngine::new(documents, MemoryItems::default());
    let actor = MemoryActor::new(1);

    let data = engine.link(&actor, "j1").await.unwrap().unwrap();
    assert_eq!(data.effort, 2);

    let expected_paths = [
        "basic.effort",
        "basic.descriptor",
        "basic.focus",
        "basic.type",
        "basic.additionalSentence",
        "pools.might.value",
        "pools.might.max",
        "pools.mightEdge",
        "pools.speed.value",
        "pools.speed.max",
        "pools.speedEdge",
        "pools.intellect.value",
        "pools.intellect.max",
        "pools.intellectEdge",
        "pools.additional.value",
        "pools.additional.max",
        "pools.additionalEdge",
    ];
    assert_eq!(actor.update_log(), expected_paths);

    assert_eq!(actor.field("basic.effort"), json!(2));
    assert_eq!(actor.field("basic.descriptor"), json!("Clever {j1}"));
    assert_eq!(actor.field("basic.focus"), json!(""));
    assert_eq!(actor.field("pools.might.value"), json!(16));
    assert_eq!(actor.field("pools.might.max"), json!(16));
    assert_eq!(actor.field("pools.mightEdge"), json!(1));
    assert_eq!(actor.field("pools.speed.value"), json!(12));
    assert_eq!(actor.field("pools.intellect.value"), json!(10));

    assert!(actor.delete_calls().is_empty());
    assert!(actor.create_calls().is_empty());
}

#[tokio::test]
async fn linking_a_plain_journal_leaves_the_actor_untouched() {
    let documents = MemoryDocuments::default().with(journal(
        "j1",
        "Session notes",
        &["What happened last week", "@might 16"],
    ));
    let engine = CreationEngine::new(documents, MemoryItems::default());
    let actor = MemoryActor::new(1);

    let outcome = engine.link(&actor, "j1").await.unwrap();
    assert!(outcome.is_none());
    assert!(actor.update_log().is_empty());
    assert!(actor.delete_calls().is_empty());
    assert!(actor.create_calls().is_empty());
}

#[tokio::test]
async fn discovery_lists_linked_journals_in_slot_order() {
    let documents = MemoryDocuments::default()
        .with(journal("j1", "Sage", &["@focus"]))
        .with(journal("j2", "Clever", &["@descriptor"]))
        .with(journal("j3", "Nano", &["@type"]));
    let engine = CreationEngine::new(documents, MemoryItems::default());
    let actor = MemoryActor::new(1);

    engine.link(&actor, "j1").await.unwrap();
    engine.link(&actor, "j3").await.unwrap();
    engine.link(&actor, "j2").await.unwrap();

    let linked = engine.linked_documents(&actor).await.unwrap();
    let ids: Vec<&str> = linked.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["j2", "j1", "j3"]);

    // A store that lost a journal leaves it out of the listing.
    let pruned = CreationEngine::new(
        MemoryDocuments::default().with(journal("j3", "Nano", &["@type"])),
        MemoryItems::default(),
    );
    let remaining = pruned.linked_documents(&actor).await.unwrap();
    let remaining_ids: Vec<&str> = remaining.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(remaining_ids, vec!["j3"]);
}

#[tokio::test]
async fn linked_journals_combine_their_grants() {
    let documents = MemoryDocuments::default()
        .with(journal(
            "j1",
            "Sage",
            &["@focus", "@skill @[sk01] @level trained", "@item @[it01] @quantity 2"],
        ))
        .with(journal(
            "j2",
            "Scholar",
            &[
                "@descriptor",
                "@skill @[sk01] @level inability",
                "@item @[it01] @quantity 3",
                "@ability @[ab01]",
            ],
        ));
    let items = MemoryItems::default()
        .with(skill("sk01", "Lore"))
        .with(equipment("it01", "Rope"))
        .with(ability("ab01", "Ward"));
    let engine = CreationEngine::new(documents, items);
    let actor = MemoryActor::new(1);

    engine.link(&actor, "j1").await.unwrap();
    assert_eq!(actor.embedded_names(), vec!["Lore", "Rope"]);

    engine.link(&actor, "j2").await.unwrap();

    // The second pass wiped the first round before recreating.
    assert_eq!(actor.delete_calls(), vec![vec!["sk01".to_string(), "it01".to_string()]]);

    let lore = actor.embedded_named("Lore").unwrap();
    assert_eq!(lore.data["skillLevel"], json!("Practiced"));
    let rope = actor.embedded_named("Rope").unwrap();
    assert_eq!(rope.data["quantity"], json!(5));
    assert!(actor.embedded_named("Ward").is_some());

    assert_eq!(actor.field("basic.focus"), json!("Sage {j1}"));
    assert_eq!(actor.field("basic.descriptor"), json!("Scholar {j2}"));
}

#[tokio::test]
async fn unlinking_keeps_what_other_journals_granted() {
    let documents = MemoryDocuments::default()
        .with(journal(
            "j1",
            "Sage",
            &["@focus", "@skill @[sk01] @level trained", "@item @[it01] @quantity 2"],
        ))
        .with(journal(
            "j2",
            "Scholar",
            &[
                "@descriptor",
                "@skill @[sk01] @level inability",
                "@item @[it01] @quantity 3",
                "@ability @[ab01]",
            ],
        ));
    let items = MemoryItems::default()
        .with(skill("sk01", "Lore"))
        .with(equipment("it01", "Rope"))
        .with(ability("ab01", "Ward"));
    let engine = CreationEngine::new(documents, items);
    let actor = MemoryActor::new(1);

    engine.link(&actor, "j1").await.unwrap();
    engine.link(&actor, "j2").await.unwrap();
    let data = engine.unlink(&actor, "j1").await.unwrap();

    // Before the removal pass the skills and the ability record their
    // grantors, so only the unlinked journal's share disappears.
    assert_eq!(
        data.find_skill("Lore").map(|s| s.level),
        Some(SkillLevel::Inability)
    );
    let lore = actor.embedded_named("Lore").unwrap();
    assert_eq!(lore.data["skillLevel"], json!("Inability"));
    let rope = actor.embedded_named("Rope").unwrap();
    assert_eq!(rope.data["quantity"], json!(3));
    assert!(actor.embedded_named("Ward").is_some());

    assert_eq!(actor.field("basic.focus"), json!(""));
    assert_eq!(actor.field("basic.descriptor"), json!("Scholar {j2}"));

    // Deletion rewrites run skills first, then abilities, then the rest.
    let last_delete = actor.delete_calls().last().cloned().unwrap();
    assert_eq!(last_delete, vec!["sk01", "ab01", "it01"]);
}

#[tokio::test]
async fn unlinking_the_last_journal_returns_the_sheet_to_baseline() {
    let documents = MemoryDocuments::default().with(journal(
        "j1",
        "Seeker",
        &[
            "@focus",
            "@might 14 1",
            "@effort 2",
            "@speed +3",
            "@skill @[sk01] @level specialized",
            "@ability @[ab01] @tier 1",
            "@item @[it01] @quantity 4",
        ],
    ));
    let items = MemoryItems::default()
        .with(skill("sk01", "Lore"))
        .with(ability("ab01", "Ward"))
        .with(equipment("it01", "Rope"));
    let engine = CreationEngine::new(documents, items);
    let actor = MemoryActor::new(1);

    engine.link(&actor, "j1").await.unwrap();
    assert_eq!(actor.embedded_names(), vec!["Lore", "Ward", "Rope"]);

    engine.unlink(&actor, "j1").await.unwrap();

    assert_eq!(actor.field("basic.effort"), json!(0));
    assert_eq!(actor.field("basic.focus"), json!(""));
    assert_eq!(actor.field("pools.might.value"), json!(10));
    assert_eq!(actor.field("pools.mightEdge"), json!(0));
    assert_eq!(actor.field("pools.speed.value"), json!(10));

    // A rope at quantity zero is not worth recreating, so the final
    // sheet carries no embedded records at all.
    assert!(actor.embedded_names().is_empty());
    assert_eq!(actor.create_calls().len(), 1);
}

#[tokio::test]
async fn an_artifact_is_never_created_twice() {
    let documents = MemoryDocuments::default()
        .with(journal("j1", "Bearer", &["@focus", "@artifact @[af01]"]))
        .with(journal("j2", "Chosen", &["@descriptor", "@artifact @[af01]"]));
    let items = MemoryItems::default().with(artifact("af01", "Sunspear"));
    let engine = CreationEngine::new(documents, items);
    let actor = MemoryActor::new(1);

    engine.link(&actor, "j1").await.unwrap();
    engine.link(&actor, "j2").await.unwrap();

    assert_eq!(actor.embedded_names(), vec!["Sunspear"]);
}

#[tokio::test]
async fn ability_grants_below_the_required_tier_are_rejected() {
    let documents = MemoryDocuments::default().with(journal(
        "j1",
        "Guard",
        &["@type", "@ability @[ab01] @tier 2"],
    ));
    let items = MemoryItems::default().with(ability("ab01", "Ward"));
    let engine = CreationEngine::new(documents, items);

    let novice = MemoryActor::new(1);
    engine.link(&novice, "j1").await.unwrap();
    assert!(novice.embedded_names().is_empty());

    let veteran = MemoryActor::new(3);
    engine.link(&veteran, "j1").await.unwrap();
    assert_eq!(veteran.embedded_names(), vec!["Ward"]);
}

#[tokio::test]
async fn an_ability_remains_until_its_last_grantor_unlinks() {
    let documents = MemoryDocuments::default()
        .with(journal("j1", "Guard", &["@type", "@ability @[ab01]"]))
        .with(journal("j2", "Warden", &["@focus", "@ability @[ab01]"]));
    let items = MemoryItems::default().with(ability("ab01", "Ward"));
    let engine = CreationEngine::new(documents, items);
    let actor = MemoryActor::new(1);

    engine.link(&actor, "j1").await.unwrap();
    engine.link(&actor, "j2").await.unwrap();
    engine.unlink(&actor, "j1").await.unwrap();
    assert_eq!(actor.embedded_names(), vec!["Ward"]);

    engine.unlink(&actor, "j2").await.unwrap();
    assert!(actor.embedded_names().is_empty());
}

#[tokio::test]
async fn modifiers_are_consumed_by_the_first_synchronization() {
    let engine = CreationEngine::new(MemoryDocuments::default(), MemoryItems::default());
    let actor = MemoryActor::new(1);
    let doc = journal("j1", "Swift", &["@focus", "@speed +2"]);

    let mut data = engine.fold(1, &[(doc, false)]).await;
    assert_eq!(data.stats.speed.pool_modifier, "+2");

    engine.synchronize(&actor, &mut data).await.unwrap();
    assert_eq!(actor.field("pools.speed.value"), json!(12));
    assert_eq!(data.stats.speed.pool_modifier, "");

    engine.synchronize(&actor, &mut data).await.unwrap();
    assert_eq!(actor.field("pools.speed.value"), json!(12));
}

#[tokio::test]
async fn relinking_a_linked_journal_does_not_double_its_effects() {
    let documents =
        MemoryDocuments::default().with(journal("j1", "Swift", &["@focus", "@speed +2"]));
    let engine = CreationEngine::new(documents, MemoryItems::default());
    let actor = MemoryActor::new(1);

    engine.link(&actor, "j1").await.unwrap();
    engine.link(&actor, "j1").await.unwrap();

    assert_eq!(actor.field("pools.speed.value"), json!(12));
}

#[tokio::test]
async fn unresolvable_item_references_do_not_block_the_rest() {
    let documents = MemoryDocuments::default().with(journal(
        "j1",
        "Scout",
        &["@focus", "@item @[missing]", "@item @[it01]"],
    ));
    let items = MemoryItems::default().with(equipment("it01", "Rope"));
    let engine = CreationEngine::new(documents, items);
    let actor = MemoryActor::new(1);

    engine.link(&actor, "j1").await.unwrap();
    assert_eq!(actor.embedded_names(), vec!["Rope"]);
}

#[tokio::test]
async fn alternate_sentinels_flow_through_the_whole_pipeline() {
    let documents = MemoryDocuments::default().with(journal(
        "j1",
        "Strong",
        &["#descriptor", "#might 15"],
    ));
    let engine = CreationEngine::new(documents, MemoryItems::default())
        .with_config(EngineConfig::default().with_sentinel('#'));
    let actor = MemoryActor::new(1);

    engine.link(&actor, "j1").await.unwrap();
    assert_eq!(actor.field("basic.descriptor"), json!("Strong {j1}"));
    assert_eq!(actor.field("pools.might.value"), json!(15));
}
