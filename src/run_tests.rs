//! Tests for the run module.

use super::*;
use whatsapp_relay::config::Cli;
use whatsapp_relay::gateway::ProviderError;

fn config(args: &[&str]) -> ValidatedConfig {
    let mut full_args = vec![
        "whatsapp-relay",
        "--account-sid",
        "AC123",
        "--auth-token",
        "secret",
    ];
    full_args.extend(args);
    ValidatedConfig::from_raw(&Cli::parse_from_iter(full_args), None).unwrap()
}

mod run_error {
    use super::*;

    #[test]
    fn send_error_displays_relay_reason() {
        let error = RunError::Send(RelayError::MissingField { field: "phone" });
        assert_eq!(error.to_string(), "Send failed: missing required field");
    }

    #[test]
    fn feed_error_displays_path() {
        let error = RunError::Feed {
            path: PathBuf::from("feed.ndjson"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(error.to_string().contains("feed.ndjson"));
    }
}

mod create_relay {
    use super::*;

    #[test]
    fn uses_configured_sender_and_timeout() {
        let relay = create_relay(&config(&["--from", "+15550001111", "--timeout", "9"])).unwrap();

        assert_eq!(relay.sender(), "+15550001111");
        assert_eq!(relay.timeout(), Some(std::time::Duration::from_secs(9)));
    }

    #[test]
    fn gateway_targets_account_messages_endpoint() {
        let relay = create_relay(&config(&[])).unwrap();

        assert_eq!(
            relay.gateway().messages_url().as_str(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn gateway_uses_configured_channel() {
        let relay = create_relay(&config(&["--channel", ""])).unwrap();
        assert_eq!(relay.gateway().channel().scheme(), "");
    }
}

mod report_send {
    use super::*;
    use whatsapp_relay::gateway::ProviderMessageId;

    #[test]
    fn sent_is_ok() {
        let outcome = SendOutcome::Sent {
            provider_message_id: ProviderMessageId::new("SM1"),
        };
        assert!(report_send(outcome).is_ok());
    }

    #[test]
    fn provider_failure_is_error() {
        let outcome = SendOutcome::Failed(RelayError::Provider(
            ProviderError::new("Authenticate").with_code("20003"),
        ));

        let error = report_send(outcome).unwrap_err();
        assert_eq!(error.to_string(), "Send failed: Authenticate");
    }
}
