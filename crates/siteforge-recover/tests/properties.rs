use proptest::prelude::*;
use siteforge_core::RequiredFile;
use siteforge_core::config::GenerationConfig;
use siteforge_recover::{
    CompletionClient, ModelError, Orchestrator, classify, recover, repair, synthesize, validate,
};

/// Answers every prompt with the same text.
struct EchoClient(String);

impl CompletionClient for EchoClient {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, ModelError> {
        Ok(self.0.clone())
    }
}

/// Free text, or something that looks like a half-broken project object.
fn model_output() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,200}",
        "[a-z \"\\\\{}`\n]{0,60}".prop_map(|body| format!(
            "```json\n{{\"/src/App.js\": {{\"code\": \"{body}\"}}, \"/src/index.js\": {{\"code\": `{body}`}}}}\n```"
        )),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generate_always_yields_required_files(raw in model_output(), request in "\\PC{0,80}") {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let config = GenerationConfig {
            retry_backoff_ms: 0,
            ..GenerationConfig::default()
        };
        let orchestrator = Orchestrator::new(EchoClient(raw), config);
        let artifact = runtime.block_on(orchestrator.generate(&request));
        for file in RequiredFile::ALL {
            prop_assert!(artifact.required(file).is_some_and(|code| !code.trim().is_empty()));
        }
    }

    #[test]
    fn recovered_artifacts_satisfy_contract(raw in model_output()) {
        if let Ok(artifact) = recover(&raw) {
            for file in RequiredFile::ALL {
                prop_assert!(artifact.required(file).is_some_and(|code| !code.trim().is_empty()));
            }
        }
    }

    #[test]
    fn repair_is_idempotent(text in "\\PC{0,200}") {
        let once = repair(&text);
        prop_assert_eq!(repair(&once), once);
    }

    #[test]
    fn classify_is_deterministic(text in "\\PC{0,120}") {
        prop_assert_eq!(classify(&text), classify(&text));
    }

    #[test]
    fn synthesized_artifact_validates(text in "\\PC{0,120}") {
        let requirements = classify(&text);
        let artifact = synthesize(&requirements, &text);
        prop_assert_eq!(&artifact, &synthesize(&requirements, &text));

        let json = artifact.to_json_pretty().unwrap();
        prop_assert_eq!(validate(&json).unwrap(), artifact);
    }
}
