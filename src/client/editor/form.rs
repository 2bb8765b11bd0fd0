use std::sync::Arc;

use super::draft::VillageDraft;
use super::path::{FieldPath, RepeatableItem, RepeatableSection};
use crate::client::api::VillageApi;
use crate::client::error::{ClientError, Result};
use crate::features::villages::dtos::VillageResponseDto;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorPhase {
    Editing,
    /// Holds the document as persisted by the server
    Submitted(VillageResponseDto),
}

/// Create or edit form for one village.
///
/// Owns the draft between edits. A failed submit leaves the draft exactly as
/// it was so the user can retry.
pub struct VillageEditor {
    api: Arc<dyn VillageApi>,
    draft: VillageDraft,
    phase: EditorPhase,
}

impl VillageEditor {
    pub fn new(api: Arc<dyn VillageApi>, existing: Option<&VillageResponseDto>) -> Self {
        Self {
            api,
            draft: VillageDraft::initialize(existing),
            phase: EditorPhase::Editing,
        }
    }

    pub fn draft(&self) -> &VillageDraft {
        &self.draft
    }

    pub fn phase(&self) -> &EditorPhase {
        &self.phase
    }

    pub fn set_field(&mut self, path: &FieldPath, value: impl Into<String>) -> Result<()> {
        self.draft = self
            .draft
            .set_field(path, value)
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        self.phase = EditorPhase::Editing;
        Ok(())
    }

    pub fn add_item(&mut self, section: RepeatableSection, item: RepeatableItem) {
        self.draft = self.draft.add_repeatable_item(section, item);
        self.phase = EditorPhase::Editing;
    }

    pub fn add_blank_item(&mut self, section: RepeatableSection) {
        self.draft = self.draft.add_blank_item(section);
        self.phase = EditorPhase::Editing;
    }

    pub fn remove_item(&mut self, section: RepeatableSection, index: usize) {
        self.draft = self.draft.remove_repeatable_item(section, index);
        self.phase = EditorPhase::Editing;
    }

    /// Validate and send the draft; new drafts are created, existing ones
    /// updated in place.
    ///
    /// Server messages come back verbatim. On success the draft is re-seeded
    /// from the persisted document, so further edits target the stored id.
    pub async fn submit(&mut self) -> Result<VillageResponseDto> {
        if let Err(e) = self.draft.validate() {
            tracing::debug!("Draft not submitted: {}", e);
            return Err(ClientError::Validation(e.to_string()));
        }

        let payload = self.draft.to_submission_payload();
        let result = match self.draft.id {
            Some(id) => self.api.update_village(id, &payload).await,
            None => self.api.create_village(&payload).await,
        };

        match result {
            Ok(saved) => {
                tracing::info!("Village saved: {} ({})", saved.name, saved.id);
                self.draft = VillageDraft::initialize(Some(&saved));
                self.phase = EditorPhase::Submitted(saved.clone());
                Ok(saved)
            }
            Err(e) => {
                tracing::warn!("Village submit failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::editor::path::{ItemField, TimelineField};
    use crate::features::villages::dtos::VillagePayloadDto;
    use crate::features::villages::models::NamedItem;
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(VillagePayloadDto),
        Update(Uuid, VillagePayloadDto),
    }

    /// Records payloads; fails with `failure` when set
    #[derive(Default)]
    struct FakeVillageApi {
        calls: Mutex<Vec<Call>>,
        failure: Mutex<Option<ClientError>>,
    }

    impl FakeVillageApi {
        fn failing(error: ClientError) -> Self {
            Self {
                failure: Mutex::new(Some(error)),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn respond(&self, id: Uuid, payload: &VillagePayloadDto) -> Result<VillageResponseDto> {
            if let Some(error) = self.failure.lock().unwrap().clone() {
                return Err(error);
            }
            Ok(VillageResponseDto {
                id,
                name: payload.name.clone(),
                district: payload.district.clone(),
                description: payload.description.clone(),
                image: payload.image.clone(),
                sections: payload.sections.clone(),
                location: payload.location,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        }
    }

    #[async_trait]
    impl VillageApi for FakeVillageApi {
        async fn create_village(&self, payload: &VillagePayloadDto) -> Result<VillageResponseDto> {
            self.calls.lock().unwrap().push(Call::Create(payload.clone()));
            self.respond(Uuid::new_v4(), payload)
        }

        async fn update_village(
            &self,
            id: Uuid,
            payload: &VillagePayloadDto,
        ) -> Result<VillageResponseDto> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Update(id, payload.clone()));
            self.respond(id, payload)
        }
    }

    fn fill_required(editor: &mut VillageEditor) {
        editor.set_field(&FieldPath::Name, "Test").unwrap();
        editor.set_field(&FieldPath::District, "X").unwrap();
        editor.set_field(&FieldPath::Description, "Y").unwrap();
        editor.set_field(&FieldPath::Image, "z.jpg").unwrap();
    }

    #[tokio::test]
    async fn test_new_village_sends_template_sections_and_origin() {
        let api = Arc::new(FakeVillageApi::default());
        let mut editor = VillageEditor::new(api.clone(), None);
        fill_required(&mut editor);

        let saved = editor.submit().await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        let Call::Create(payload) = &calls[0] else {
            panic!("expected a create call, got {:?}", calls[0]);
        };
        let body = serde_json::to_value(payload).unwrap();
        assert_eq!(
            body["sections"]["temples"],
            json!([{ "name": "", "description": "", "image": "" }])
        );
        assert_eq!(
            body["location"],
            json!({ "type": "Point", "coordinates": [0.0, 0.0] })
        );
        assert_eq!(body["name"], "Test");

        assert_eq!(editor.phase(), &EditorPhase::Submitted(saved.clone()));
        assert_eq!(editor.draft().id, Some(saved.id));
    }

    #[tokio::test]
    async fn test_existing_village_is_updated() {
        let api = Arc::new(FakeVillageApi::default());
        let existing = api
            .respond(
                Uuid::new_v4(),
                &VillageDraft::initialize(None)
                    .set_field(&FieldPath::Name, "Hampi")
                    .unwrap()
                    .to_submission_payload(),
            )
            .unwrap();

        let mut editor = VillageEditor::new(api.clone(), Some(&existing));
        fill_required(&mut editor);
        editor
            .set_field(&FieldPath::Timeline(0, TimelineField::Era), "Vijayanagara")
            .unwrap();
        editor.submit().await.unwrap();

        match &api.calls()[..] {
            [Call::Update(id, payload)] => {
                assert_eq!(*id, existing.id);
                assert_eq!(payload.sections.history.timeline[0].era, "Vijayanagara");
            }
            other => panic!("expected one update, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_required_fields_block_submit() {
        let api = Arc::new(FakeVillageApi::default());
        let mut editor = VillageEditor::new(api.clone(), None);
        editor.set_field(&FieldPath::Name, "Test").unwrap();

        let err = editor.submit().await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        assert!(err.to_string().starts_with("Please fill in all required fields"));
        assert!(api.calls().is_empty());
        assert_eq!(editor.phase(), &EditorPhase::Editing);
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft_and_message() {
        let api = Arc::new(FakeVillageApi::failing(ClientError::Validation(
            "Village name already taken".to_string(),
        )));
        let mut editor = VillageEditor::new(api.clone(), None);
        fill_required(&mut editor);
        editor.add_item(
            RepeatableSection::Temples,
            RepeatableItem::NamedItem(NamedItem {
                name: "Virupaksha".to_string(),
                ..Default::default()
            }),
        );
        let before = editor.draft().clone();

        let err = editor.submit().await.unwrap_err();

        assert_eq!(err.to_string(), "Village name already taken");
        assert_eq!(editor.draft(), &before);
        assert_eq!(
            editor.draft().get(&FieldPath::Temple(1, ItemField::Name)),
            Some("Virupaksha")
        );
        assert_eq!(editor.phase(), &EditorPhase::Editing);
    }

    #[tokio::test]
    async fn test_server_failure_reads_as_server_error() {
        let api = Arc::new(FakeVillageApi::failing(ClientError::Server(
            "Server error".to_string(),
        )));
        let mut editor = VillageEditor::new(api, None);
        fill_required(&mut editor);

        let err = editor.submit().await.unwrap_err();
        assert_eq!(err.to_string(), "Server error");
    }

    #[test]
    fn test_out_of_range_edit_surfaces_as_validation() {
        let api = Arc::new(FakeVillageApi::default());
        let mut editor = VillageEditor::new(api, None);

        let err = editor
            .set_field(&FieldPath::Timeline(4, TimelineField::Era), "x")
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));

        editor.remove_item(RepeatableSection::Timeline, 0);
        editor.add_blank_item(RepeatableSection::Timeline);
        assert_eq!(editor.draft().item_count(RepeatableSection::Timeline), 1);
    }
}
