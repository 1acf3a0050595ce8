//! Writing a folded aggregate onto a character sheet.
//!
//! Synchronization wipes and rewrites: every sentence slot, every pool
//! and the whole embedded record set are replaced by what the fold
//! produced, so values from earlier links cannot linger. Accumulated
//! modifier expressions are consumed here exactly once.

use serde_json::Value;
use tracing::debug;

use cq_core::{CreationData, ItemKind, ItemPayload, SentenceSlot, StatName};
use cq_parse::eval_modifier;

use crate::error::{EngineError, EngineResult, SyncStage};
use crate::host::{ActorRecord, HostError};

fn staged(stage: SyncStage) -> impl FnOnce(HostError) -> EngineError {
    move |source| EngineError::SyncFailed { stage, source }
}

/// Push `data` onto `actor`.
pub(crate) async fn write_actor<A>(actor: &A, data: &mut CreationData) -> EngineResult<()>
where
    A: ActorRecord + ?Sized,
{
    let effort_delta = eval_modifier(&data.effort_modifier)?;
    if effort_delta > 0 {
        data.effort += effort_delta;
    }
    data.effort_modifier.clear();
    actor
        .update("basic.effort", Value::from(data.effort))
        .await
        .map_err(staged(SyncStage::Effort))?;

    for slot in SentenceSlot::all() {
        let path = format!("basic.{}", slot.field());
        actor
            .update(&path, Value::from(data.sentence.get(slot)))
            .await
            .map_err(staged(SyncStage::Sentence))?;
    }

    for name in StatName::all() {
        let (value, edge) = {
            let stat = data.stats.get_mut(name);
            let pool_delta = eval_modifier(&stat.pool_modifier)?;
            let edge_delta = eval_modifier(&stat.edge_modifier)?;
            // A stat with any positive movement takes both deltas, so a
            // pool raise and an edge drop land together.
            if pool_delta > 0 || edge_delta > 0 {
                stat.value += pool_delta;
                stat.edge += edge_delta;
            }
            stat.pool_modifier.clear();
            stat.edge_modifier.clear();
            (stat.value, stat.edge)
        };
        actor
            .update(&format!("pools.{name}.value"), Value::from(value))
            .await
            .map_err(staged(SyncStage::Pools))?;
        actor
            .update(&format!("pools.{name}.max"), Value::from(value))
            .await
            .map_err(staged(SyncStage::Pools))?;
        actor
            .update(&format!("pools.{name}Edge"), Value::from(edge))
            .await
            .map_err(staged(SyncStage::Pools))?;
    }

    let mut skills = Vec::new();
    let mut abilities = Vec::new();
    let mut others = Vec::new();
    for summary in actor.embedded_items() {
        match summary.kind() {
            ItemKind::Skill => skills.push(summary.id),
            ItemKind::Ability => abilities.push(summary.id),
            _ => others.push(summary.id),
        }
    }
    let mut to_delete = skills;
    to_delete.append(&mut abilities);
    to_delete.append(&mut others);

    let mut to_create: Vec<ItemPayload> = Vec::new();
    for skill in data.skills() {
        to_create.push(skill.payload.clone());
    }
    for ability in data.abilities() {
        to_create.push(ability.payload.clone());
    }
    for item in data.items() {
        let kind = item.payload.kind();
        if kind != ItemKind::Skill && kind != ItemKind::Ability && item.quantity > 0 {
            to_create.push(item.payload.clone());
        }
    }

    let deleted = to_delete.len();
    let created = to_create.len();
    if !to_delete.is_empty() {
        actor
            .delete_embedded(to_delete)
            .await
            .map_err(staged(SyncStage::DeleteEmbedded))?;
    }
    if !to_create.is_empty() {
        actor
            .create_embedded(to_create)
            .await
            .map_err(staged(SyncStage::CreateEmbedded))?;
    }
    debug!(deleted, created, "embedded records rewritten");

    Ok(())
}
