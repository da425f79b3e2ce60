//! Workflow controller — owns one session's state and sequences the gateway
//! calls.
//!
//! All session mutation is funneled through the named operations here; the
//! display layer only ever receives an immutable [`SessionSnapshot`] and
//! reports user intents back as operation calls.
//!
//! Busy/error semantics: one boolean busy flag and one nullable error value
//! for the whole session. Starting an operation clears the prior error; at
//! most one operation is in flight at a time, and the busy guard is
//! authoritative — re-entrant calls fail with [`WorkflowError::Busy`] instead
//! of relying on the display layer to disable controls. The flag is cleared
//! on every exit path, so a failed call never leaves the session disabled.
//! Stage never regresses on error; the user stays at the last completed stage
//! and may retry.

use tracing::{info, warn};

use crate::artifacts::{BrandKit, ContentPackage};
use crate::error::{GatewayError, WorkflowError};
use crate::event_log::EventLog;
use crate::gateway::{AspectRatio, GenerativeGateway};
use crate::project::ProjectDescriptor;
use crate::prompts;
use crate::stage::{StageTracker, TransitionRecord, WorkflowStage};

/// Immutable view of the session handed to the display layer after each
/// mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub stage: WorkflowStage,
    pub project: Option<ProjectDescriptor>,
    pub brand_kit: Option<BrandKit>,
    pub content: Option<ContentPackage>,
    pub busy: bool,
    pub error: Option<String>,
    pub log: Vec<String>,
}

/// Session-scoped controller over a generative gateway.
pub struct WorkflowController<G> {
    gateway: G,
    stages: StageTracker,
    project: Option<ProjectDescriptor>,
    brand_kit: Option<BrandKit>,
    content: Option<ContentPackage>,
    busy: bool,
    error: Option<String>,
    log: EventLog,
}

impl<G: GenerativeGateway> WorkflowController<G> {
    pub fn new(gateway: G) -> Self {
        let mut log = EventLog::new();
        log.push("Launch assistant online, ready to process raw ideas.");
        Self {
            gateway,
            stages: StageTracker::new(),
            project: None,
            brand_kit: None,
            content: None,
            busy: false,
            error: None,
            log,
        }
    }

    // -- operations ---------------------------------------------------------

    /// Validate the descriptor and run the brand-strategy call.
    ///
    /// On success the session holds the new brand kit and moves to
    /// `Branding`. Validation failures happen before the gateway is touched
    /// and leave stage and busy flag untouched.
    pub async fn start_branding(
        &mut self,
        descriptor: ProjectDescriptor,
    ) -> Result<(), WorkflowError> {
        if self.busy {
            return Err(WorkflowError::Busy);
        }
        if let Err(err) = descriptor.validate() {
            self.error = Some(err.user_message());
            return Err(err);
        }

        self.error = None;
        self.busy = true;
        self.project = Some(descriptor.clone());
        self.log
            .push(&format!("Injecting brand DNA for \"{}\"...", descriptor.name));
        info!(project = %descriptor.name, "Brand strategy requested");

        let result = self.gateway.brand_strategy(&descriptor).await;
        self.busy = false;

        match result {
            Ok(kit) => {
                self.brand_kit = Some(kit);
                self.advance(WorkflowStage::Branding, "brand strategy generated");
                self.log.push("Brand evolution complete.");
                Ok(())
            }
            Err(err) => Err(self.surface(err)),
        }
    }

    /// Derive a descriptor from a trending topic, reset the session, and run
    /// the branding call in one shot. A convenience composition, not a
    /// separate stage.
    pub async fn generate_from_hotspot(&mut self, topic: &str) -> Result<(), WorkflowError> {
        if self.busy {
            return Err(WorkflowError::Busy);
        }
        let descriptor = ProjectDescriptor::from_hotspot(topic);
        self.clear_session("hotspot capture");
        self.log.push(&format!(
            "Hotspot captured: {topic}, launching one-shot pipeline..."
        ));
        self.start_branding(descriptor).await
    }

    /// Render logo and banner and merge them into the brand kit.
    ///
    /// No-op without a brand kit. The merge is all-or-nothing: on failure of
    /// either image call the stored kit is exactly the pre-operation value.
    pub async fn generate_visuals(&mut self) -> Result<(), WorkflowError> {
        if self.busy {
            return Err(WorkflowError::Busy);
        }
        let (Some(project), Some(brand)) = (self.project.clone(), self.brand_kit.clone())
        else {
            return Ok(());
        };

        self.error = None;
        self.busy = true;
        self.log.push("Rendering visual asset matrix...");
        info!(project = %project.name, "Visual assets requested");

        let logo_prompt = prompts::mascot_logo(&project, &brand);
        let banner_prompt = prompts::web_banner(&project, &brand);
        let result = render_assets(&self.gateway, &logo_prompt, &banner_prompt).await;
        self.busy = false;

        match result {
            Ok((logo_url, banner_url)) => {
                let mut updated = brand;
                updated.logo_url = Some(logo_url);
                updated.banner_url = Some(banner_url);
                self.brand_kit = Some(updated);
                self.advance(WorkflowStage::Visuals, "visual assets rendered");
                self.log.push("Visual assets deployed.");
                Ok(())
            }
            Err(err) => Err(self.surface(err)),
        }
    }

    /// Generate the marketing content package. No-op without a brand kit;
    /// the package is stored atomically on success.
    pub async fn generate_content(&mut self) -> Result<(), WorkflowError> {
        if self.busy {
            return Err(WorkflowError::Busy);
        }
        let (Some(project), Some(brand)) = (self.project.clone(), self.brand_kit.clone())
        else {
            return Ok(());
        };

        self.error = None;
        self.busy = true;
        self.log.push("Generating full-spectrum marketing copy...");
        info!(project = %project.name, "Marketing content requested");

        let result = self.gateway.marketing_content(&project, &brand).await;
        self.busy = false;

        match result {
            Ok(package) => {
                self.content = Some(package);
                self.advance(WorkflowStage::Content, "content package generated");
                self.log.push("Marketing package injected.");
                Ok(())
            }
            Err(err) => Err(self.surface(err)),
        }
    }

    /// Unlock the distribution stage. Pure local transition, no gateway
    /// call; no-op without a content package.
    pub fn advance_to_distribution(&mut self) -> Result<(), WorkflowError> {
        if self.content.is_none() {
            return Ok(());
        }
        self.advance(WorkflowStage::Distribution, "distribution unlocked");
        self.log.push("Distribution stage unlocked.");
        Ok(())
    }

    /// Full reset: back to `Init`, artifacts and error discarded. Always
    /// succeeds and is idempotent.
    pub fn reset(&mut self) {
        self.clear_session("full reset");
        self.log.push("Session reset.");
    }

    // -- observation --------------------------------------------------------

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            stage: self.stages.current(),
            project: self.project.clone(),
            brand_kit: self.brand_kit.clone(),
            content: self.content.clone(),
            busy: self.busy,
            error: self.error.clone(),
            log: self.log.entries(),
        }
    }

    pub fn stage(&self) -> WorkflowStage {
        self.stages.current()
    }

    pub fn brand_kit(&self) -> Option<&BrandKit> {
        self.brand_kit.as_ref()
    }

    pub fn content(&self) -> Option<&ContentPackage> {
        self.content.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        self.stages.transitions()
    }

    // -- internals ----------------------------------------------------------

    fn clear_session(&mut self, reason: &str) {
        self.stages.reset(reason);
        self.brand_kit = None;
        self.content = None;
        self.error = None;
    }

    fn advance(&mut self, to: WorkflowStage, reason: &str) {
        if let Err(err) = self.stages.advance(to, Some(reason)) {
            warn!(%err, "Stage advance rejected, keeping current stage");
        }
    }

    /// Convert a gateway failure into the single user-visible error
    /// indicator. Stage is left untouched.
    fn surface(&mut self, err: GatewayError) -> WorkflowError {
        warn!(error = %err, stage = %self.stages.current(), "Generation failed");
        let surfaced: WorkflowError = err.into();
        self.error = Some(surfaced.user_message());
        surfaced
    }
}

/// Run both image calls; nothing is merged unless both succeed.
async fn render_assets<G: GenerativeGateway>(
    gateway: &G,
    logo_prompt: &str,
    banner_prompt: &str,
) -> Result<(String, String), GatewayError> {
    let logo = gateway.visual_asset(logo_prompt, AspectRatio::Square).await?;
    let banner = gateway
        .visual_asset(banner_prompt, AspectRatio::Widescreen)
        .await?;
    Ok((logo, banner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockGenerativeGateway;

    fn descriptor() -> ProjectDescriptor {
        ProjectDescriptor::new(
            "TrenchCat",
            "TCX",
            "cat-themed meme token",
            "DeGen Community",
            "Solana",
        )
    }

    fn brand_kit() -> BrandKit {
        BrandKit {
            tagline: "Dig deeper".into(),
            mission_statement: "Cats in every trench".into(),
            colors: vec!["#00FF00".into(), "#000000".into()],
            visual_style: "neon pixel art".into(),
            logo_url: None,
            banner_url: None,
        }
    }

    #[tokio::test]
    async fn validation_failure_never_reaches_gateway() {
        let mut gateway = MockGenerativeGateway::new();
        gateway.expect_brand_strategy().times(0);
        let mut controller = WorkflowController::new(gateway);

        let mut incomplete = descriptor();
        incomplete.concept.clear();
        let err = controller.start_branding(incomplete).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(controller.stage(), WorkflowStage::Init);
        assert!(!controller.is_busy());
        assert!(controller.last_error().unwrap().contains("concept"));
    }

    #[tokio::test]
    async fn successful_branding_advances_and_stores_kit() {
        let mut gateway = MockGenerativeGateway::new();
        gateway
            .expect_brand_strategy()
            .times(1)
            .returning(|_| Ok(brand_kit()));
        let mut controller = WorkflowController::new(gateway);

        controller.start_branding(descriptor()).await.unwrap();

        assert_eq!(controller.stage(), WorkflowStage::Branding);
        let kit = controller.brand_kit().unwrap();
        assert!(!kit.tagline.is_empty());
        assert!(!kit.colors.is_empty());
        assert!(!controller.is_busy());
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn branding_failure_keeps_stage_and_clears_busy() {
        let mut gateway = MockGenerativeGateway::new();
        gateway
            .expect_brand_strategy()
            .returning(|_| Err(GatewayError::Provider("503 overloaded".into())));
        let mut controller = WorkflowController::new(gateway);

        let err = controller.start_branding(descriptor()).await.unwrap_err();

        assert!(matches!(err, WorkflowError::Generation(_)));
        assert_eq!(controller.stage(), WorkflowStage::Init);
        assert!(controller.brand_kit().is_none());
        assert!(!controller.is_busy());
        assert!(controller.last_error().is_some());
    }

    #[tokio::test]
    async fn busy_guard_rejects_reentrant_calls() {
        let gateway = MockGenerativeGateway::new();
        let mut controller = WorkflowController::new(gateway);
        controller.busy = true;

        assert!(controller
            .start_branding(descriptor())
            .await
            .unwrap_err()
            .is_busy());
        assert!(controller
            .generate_from_hotspot("topic")
            .await
            .unwrap_err()
            .is_busy());
        assert!(controller.generate_visuals().await.unwrap_err().is_busy());
        assert!(controller.generate_content().await.unwrap_err().is_busy());
    }

    #[tokio::test]
    async fn visuals_without_brand_kit_is_noop() {
        let mut gateway = MockGenerativeGateway::new();
        gateway.expect_visual_asset().times(0);
        let mut controller = WorkflowController::new(gateway);

        controller.generate_visuals().await.unwrap();

        assert_eq!(controller.stage(), WorkflowStage::Init);
        assert!(controller.brand_kit().is_none());
    }

    #[tokio::test]
    async fn content_without_brand_kit_is_noop() {
        let mut gateway = MockGenerativeGateway::new();
        gateway.expect_marketing_content().times(0);
        let mut controller = WorkflowController::new(gateway);

        controller.generate_content().await.unwrap();
        assert!(controller.content().is_none());
    }

    #[tokio::test]
    async fn partial_image_failure_discards_everything() {
        let mut gateway = MockGenerativeGateway::new();
        gateway
            .expect_brand_strategy()
            .returning(|_| Ok(brand_kit()));
        // Logo (square) succeeds, banner (widescreen) fails
        gateway
            .expect_visual_asset()
            .withf(|_, aspect| *aspect == AspectRatio::Square)
            .returning(|_, _| Ok("data:image/png;base64,LOGO".into()));
        gateway
            .expect_visual_asset()
            .withf(|_, aspect| *aspect == AspectRatio::Widescreen)
            .returning(|_, _| Err(GatewayError::NoImageReturned));
        let mut controller = WorkflowController::new(gateway);

        controller.start_branding(descriptor()).await.unwrap();
        let before = controller.brand_kit().cloned().unwrap();

        let err = controller.generate_visuals().await.unwrap_err();
        assert!(matches!(err, WorkflowError::Generation(_)));

        // No partial merge: kit is exactly the pre-operation value
        assert_eq!(controller.brand_kit().unwrap(), &before);
        assert!(controller.brand_kit().unwrap().logo_url.is_none());
        assert_eq!(controller.stage(), WorkflowStage::Branding);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn starting_an_operation_clears_prior_error() {
        let mut gateway = MockGenerativeGateway::new();
        // Popped back-to-front: first call fails, second succeeds
        let mut responses = vec![
            Ok(brand_kit()),
            Err(GatewayError::SchemaViolation("missing field `tagline`".into())),
        ];
        gateway
            .expect_brand_strategy()
            .times(2)
            .returning(move |_| responses.pop().unwrap());
        let mut controller = WorkflowController::new(gateway);

        assert!(controller.start_branding(descriptor()).await.is_err());
        assert!(controller.last_error().is_some());

        controller.start_branding(descriptor()).await.unwrap();
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn hotspot_derivation_resets_then_brands() {
        let mut gateway = MockGenerativeGateway::new();
        gateway
            .expect_brand_strategy()
            .withf(|project| {
                project.name.chars().count() == 8
                    && project.ticker == "HOT"
                    && project.concept.contains("好想来零食回应超话")
            })
            .times(1)
            .returning(|_| Ok(brand_kit()));
        let mut controller = WorkflowController::new(gateway);

        controller
            .generate_from_hotspot("好想来零食回应超话")
            .await
            .unwrap();

        assert_eq!(controller.stage(), WorkflowStage::Branding);
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.project.unwrap().name, "好想来零食回应超");
    }

    #[tokio::test]
    async fn distribution_requires_content_package() {
        let gateway = MockGenerativeGateway::new();
        let mut controller = WorkflowController::new(gateway);

        controller.advance_to_distribution().unwrap();
        assert_eq!(controller.stage(), WorkflowStage::Init);
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let mut gateway = MockGenerativeGateway::new();
        gateway
            .expect_brand_strategy()
            .returning(|_| Ok(brand_kit()));
        let mut controller = WorkflowController::new(gateway);
        controller.start_branding(descriptor()).await.unwrap();

        controller.reset();
        let first = controller.snapshot();
        controller.reset();
        let second = controller.snapshot();

        for snapshot in [&first, &second] {
            assert_eq!(snapshot.stage, WorkflowStage::Init);
            assert!(snapshot.brand_kit.is_none());
            assert!(snapshot.content.is_none());
            assert!(snapshot.error.is_none());
            assert!(!snapshot.busy);
        }
    }

    #[tokio::test]
    async fn snapshot_reflects_log_and_transitions() {
        let mut gateway = MockGenerativeGateway::new();
        gateway
            .expect_brand_strategy()
            .returning(|_| Ok(brand_kit()));
        let mut controller = WorkflowController::new(gateway);
        controller.start_branding(descriptor()).await.unwrap();

        let snapshot = controller.snapshot();
        assert!(snapshot
            .log
            .iter()
            .any(|entry| entry.contains("Brand evolution complete")));
        assert_eq!(controller.transitions().len(), 1);
        assert_eq!(controller.transitions()[0].to, WorkflowStage::Branding);
    }
}
