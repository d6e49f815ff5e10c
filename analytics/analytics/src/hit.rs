use analytics_client::{
    ClientId, EnvSettings, Event, EventFactory, EventTracker, TrackerConfig, TrackingResult, SETTING_TRACKING_ID,
};
use std::collections::HashMap;
use std::process::ExitCode;

#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
pub struct IdentityArgs {
    /// Anonymous client id, sent as is.
    #[arg(long = "client-id")]
    pub client_id: Option<String>,

    /// Name to derive the anonymous client id from.
    #[arg(long = "client-name")]
    pub client_name: Option<String>,

    /// Id of a signed in user.
    #[arg(long = "user-id")]
    pub user_id: Option<String>,
}

/// The event to send and where to send it.
#[derive(clap::Args, Debug)]
pub struct HitArgs {
    /// Web property to track for, instead of the UNIVERSAL_ANALYTICS_TRACKING_ID environment variable.
    #[arg(long = "tracking-id")]
    pub tracking_id: Option<String>,

    #[command(flatten)]
    pub identity: IdentityArgs,

    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub action: String,

    #[arg(long)]
    pub label: Option<String>,

    #[arg(long)]
    pub value: Option<String>,

    /// Mark the event as not caused by user interaction.
    #[arg(long = "non-interaction")]
    pub non_interaction: bool,

    /// Additional parameter to send, as `key=value`. Can be repeated.
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    #[command(flatten)]
    pub config: TrackerConfig,
}

impl HitArgs {
    pub fn event(&self) -> anyhow::Result<Event> {
        let mut builder = match &self.tracking_id {
            Some(tracking_id) => {
                EventFactory::new(HashMap::from([(SETTING_TRACKING_ID.to_string(), tracking_id.clone())])).builder()?
            }
            None => EventFactory::new(EnvSettings).builder()?,
        };

        let identity = &self.identity;
        if let Some(client_id) = &identity.client_id {
            builder = builder.client_id(client_id);
        }
        if let Some(name) = &identity.client_name {
            builder = builder.client_id(ClientId::from_name(name));
        }
        if let Some(user_id) = &identity.user_id {
            builder = builder.user_id(user_id);
        }

        builder = builder
            .category(&self.category)
            .action(&self.action)
            .non_interaction(self.non_interaction);
        if let Some(label) = &self.label {
            builder = builder.label(label);
        }
        if let Some(value) = &self.value {
            builder = builder.value(value);
        }

        Ok(builder.build()?)
    }

    pub fn tracker(&self) -> anyhow::Result<EventTracker> {
        let mut tracker = EventTracker::new(self.config.clone())?;
        for (key, value) in &self.params {
            tracker.add_to_custom_payload(key, value)?;
        }
        Ok(tracker)
    }
}

fn parse_param(param: &str) -> Result<(String, String), String> {
    match param.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected 'key=value', got '{param}'")),
    }
}

#[derive(clap::Args, Debug)]
#[command(about = "Send an event hit")]
pub struct Track {
    #[command(flatten)]
    pub hit: HitArgs,

    /// Send the hit as a form built from the parameter list.
    #[arg(long)]
    pub form: bool,
}

impl Track {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let event = self.hit.event()?;
        let tracker = self.hit.tracker()?;

        let result = if self.form {
            tracker.track_event_form(&event).await
        } else {
            tracker.track_event(&event).await
        };

        Ok(report(result))
    }
}

#[derive(clap::Args, Debug)]
#[command(about = "Check an event hit against the validation endpoint, without recording it")]
pub struct Validate {
    #[command(flatten)]
    pub hit: HitArgs,
}

impl Validate {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let event = self.hit.event()?;
        let tracker = self.hit.tracker()?;

        let result = tracker.validate_hit(&event).await;
        if let Some(response) = result.validation_response() {
            println!("{response}");
        }

        match result.is_valid() {
            Ok(true) => {
                log::info!("Hit is valid");
                Ok(ExitCode::SUCCESS)
            }
            Ok(false) => {
                eprintln!("Hit is not valid");
                Ok(ExitCode::FAILURE)
            }
            Err(_) => Ok(report(result)),
        }
    }
}

fn report<E: std::fmt::Display>(result: TrackingResult<E>) -> ExitCode {
    match result.into_error() {
        None => {
            log::info!("Hit sent");
            ExitCode::SUCCESS
        }
        Some(err) => {
            eprintln!("Failed to send hit: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Command;
    use clap::Parser;
    use rstest::rstest;

    #[derive(clap::Parser, Debug)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> HitArgs {
        match Cli::try_parse_from(args.iter().copied()).unwrap().command {
            Command::Track(track) => track.hit,
            Command::Validate(validate) => validate.hit,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn track_event() {
        let hit = parse(&[
            "test",
            "track",
            "--tracking-id",
            "UA-1-1",
            "--client-id",
            "cid1",
            "--category",
            "cat",
            "--action",
            "act",
            "--label",
            "lbl",
            "--value",
            "10",
            "--param",
            "qt=560",
        ]);
        let event = hit.event().unwrap();

        assert_eq!(event.tracking_id(), "UA-1-1");
        assert_eq!(event.client_id(), Some("cid1"));
        assert_eq!(event.label(), Some("lbl"));
        assert_eq!(event.value(), Some("10"));
        assert!(!event.non_interaction());
        assert_eq!(hit.params, [("qt".to_string(), "560".to_string())]);

        let tracker = hit.tracker().unwrap();
        assert_eq!(tracker.custom_payload().get("qt"), Some("560"));
    }

    #[test]
    fn derived_client_id() {
        let hit = parse(&[
            "test",
            "validate",
            "--tracking-id",
            "UA-1-1",
            "--client-name",
            "foo",
            "--category",
            "cat",
            "--action",
            "act",
            "--non-interaction",
        ]);
        let event = hit.event().unwrap();

        assert_eq!(event.client_id(), Some("5e7d2ef0-39c7-53c5-9fd1-8e8d95ed55d2"));
        assert!(event.non_interaction());
    }

    #[test]
    fn reserved_param_is_rejected() {
        let hit = parse(&[
            "test",
            "track",
            "--tracking-id",
            "UA-1-1",
            "--user-id",
            "user",
            "--category",
            "cat",
            "--action",
            "act",
            "--param",
            "ec=hacked",
        ]);
        assert!(hit.tracker().is_err());
    }

    #[test]
    fn blank_category_is_rejected() {
        let hit = parse(&[
            "test", "track", "--tracking-id", "UA-1-1", "--user-id", "user", "--category", " ", "--action", "act",
        ]);
        assert!(hit.event().is_err());
    }

    #[rstest]
    #[case(&["test", "track", "--category", "cat", "--action", "act"])]
    #[case(&["test", "track", "--client-id", "c", "--user-id", "u", "--category", "cat", "--action", "act"])]
    #[case(&["test", "track", "--client-id", "c", "--category", "cat", "--action", "act", "--param", "qt"])]
    fn invalid_arguments(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args.iter().copied()).is_err());
    }

    #[rstest]
    #[case("qt=560", Some(("qt", "560")))]
    #[case("cd1=a=b", Some(("cd1", "a=b")))]
    #[case("empty=", Some(("empty", "")))]
    #[case("=value", None)]
    #[case("qt", None)]
    fn params(#[case] param: &str, #[case] expected: Option<(&str, &str)>) {
        let expected = expected.map(|(k, v)| (k.to_string(), v.to_string()));
        assert_eq!(parse_param(param).ok(), expected);
    }
}
