mod status {
    use montorrent_test_helpers::configuration::{ephemeral, ephemeral_with_cache};
    use reqwest::header;

    use crate::common::fake_rtorrent::FakeRtorrent;
    use crate::servers::status_api::client::Client;
    use crate::servers::status_api::environment::Environment;

    #[tokio::test]
    async fn should_return_the_status_of_every_download() {
        let rtorrent = FakeRtorrent::new();
        rtorrent.add("ABC123", "My Movie", 500, 500);

        let env = Environment::start(&ephemeral(), rtorrent).await;

        let response = Client::new(env.bind_address).get_status().await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(
            response.text().await.unwrap(),
            "{\n\t\"ABC123\": {\n\t\t\"Name\": \"My Movie\",\n\t\t\"BytesDone\": 500,\n\t\t\"BytesLeft\": 500,\n\t\t\"BytesTotal\": 1000,\n\t\t\"PercentDone\": 50\n\t}\n}\n"
        );

        env.stop().await;
    }

    #[tokio::test]
    async fn should_return_an_empty_object_when_there_are_no_downloads() {
        let env = Environment::start(&ephemeral(), FakeRtorrent::new()).await;

        let response = Client::new(env.bind_address).get_status().await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "{}\n");

        env.stop().await;
    }

    #[tokio::test]
    async fn should_serve_the_status_on_any_other_path() {
        let rtorrent = FakeRtorrent::new();
        rtorrent.add("ABC123", "My Movie", 500, 500);

        let env = Environment::start(&ephemeral(), rtorrent).await;

        let response = Client::new(env.bind_address).get("/whatever").await;

        assert_eq!(response.status(), 200);
        let status: serde_json::Value = response.json().await.unwrap();
        assert_eq!(status["ABC123"]["PercentDone"], 50);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_identify_the_server() {
        let env = Environment::start(&ephemeral(), FakeRtorrent::new()).await;

        let response = Client::new(env.bind_address).get_status().await;

        let server = response.headers().get(header::SERVER).unwrap().to_str().unwrap();
        assert!(server.starts_with("montorrent/"));
        assert!(response.headers().get("x-request-id").is_some());

        env.stop().await;
    }

    #[tokio::test]
    async fn should_poll_rtorrent_for_every_request_when_the_cache_is_disabled() {
        let env = Environment::start(&ephemeral(), FakeRtorrent::new()).await;
        let client = Client::new(env.bind_address);

        client.get_status().await;
        client.get_status().await;

        assert_eq!(env.rtorrent.listing_calls(), 2);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_serve_the_cached_status_within_the_cache_window() {
        let rtorrent = FakeRtorrent::new();
        rtorrent.add("ABC123", "My Movie", 500, 500);

        let env = Environment::start(&ephemeral_with_cache(3600), rtorrent).await;
        let client = Client::new(env.bind_address);

        let first = client.get_status().await.text().await.unwrap();

        env.rtorrent.add("ABC123", "My Movie", 1000, 0);

        let second = client.get_status().await.text().await.unwrap();

        assert_eq!(env.rtorrent.listing_calls(), 1);
        assert_eq!(first, second);

        env.stop().await;
    }
}

mod status_failures {
    use montorrent_test_helpers::configuration::ephemeral;

    use crate::common::fake_rtorrent::FakeRtorrent;
    use crate::servers::status_api::client::Client;
    use crate::servers::status_api::environment::Environment;

    #[tokio::test]
    async fn should_fail_when_rtorrent_does_not_answer() {
        let rtorrent = FakeRtorrent::new();
        rtorrent.go_down();

        let env = Environment::start(&ephemeral(), rtorrent).await;

        let response = Client::new(env.bind_address).get_status().await;

        assert_eq!(response.status(), 500);
        assert_eq!(response.text().await.unwrap(), "could not get torrents list\n");

        env.stop().await;
    }

    #[tokio::test]
    async fn should_fail_when_a_download_has_no_size_yet() {
        let rtorrent = FakeRtorrent::new();
        rtorrent.add("ABC123", "My Movie", 500, 500);
        rtorrent.add("DEF456", "magnet link", 0, 0);

        let env = Environment::start(&ephemeral(), rtorrent).await;

        let response = Client::new(env.bind_address).get_status().await;

        assert_eq!(response.status(), 500);
        assert_eq!(response.text().await.unwrap(), "could not get torrent status\n");

        env.stop().await;
    }
}

mod authentication {
    use montorrent_test_helpers::configuration::ephemeral_with_credentials;
    use reqwest::header;

    use crate::common::fake_rtorrent::FakeRtorrent;
    use crate::servers::status_api::client::Client;
    use crate::servers::status_api::environment::Environment;

    #[tokio::test]
    async fn should_require_credentials_when_they_are_configured() {
        let env = Environment::start(&ephemeral_with_credentials("admin", "MyPassword"), FakeRtorrent::new()).await;

        let response = Client::new(env.bind_address).get_status().await;

        assert_eq!(response.status(), 401);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"montorrent\""
        );
        assert_eq!(env.rtorrent.listing_calls(), 0);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_reject_wrong_credentials() {
        let env = Environment::start(&ephemeral_with_credentials("admin", "MyPassword"), FakeRtorrent::new()).await;

        let response = Client::authenticated(env.bind_address, "admin", "wrong").get_status().await;

        assert_eq!(response.status(), 401);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_protect_every_path() {
        let env = Environment::start(&ephemeral_with_credentials("admin", "MyPassword"), FakeRtorrent::new()).await;

        let response = Client::new(env.bind_address).get("/whatever").await;

        assert_eq!(response.status(), 401);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_serve_the_status_with_the_right_credentials() {
        let rtorrent = FakeRtorrent::new();
        rtorrent.add("ABC123", "My Movie", 500, 500);

        let env = Environment::start(&ephemeral_with_credentials("admin", "MyPassword"), rtorrent).await;

        let response = Client::authenticated(env.bind_address, "admin", "MyPassword")
            .get_status()
            .await;

        assert_eq!(response.status(), 200);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_not_require_credentials_for_the_health_check() {
        let env = Environment::start(&ephemeral_with_credentials("admin", "MyPassword"), FakeRtorrent::new()).await;

        let response = Client::new(env.bind_address).get_health_check().await;

        assert_eq!(response.status(), 200);

        env.stop().await;
    }
}

mod health_check {
    use montorrent::servers::status_api::resources::{Report, Status};
    use montorrent_test_helpers::configuration::ephemeral;

    use crate::common::fake_rtorrent::FakeRtorrent;
    use crate::servers::status_api::client::Client;
    use crate::servers::status_api::environment::Environment;

    #[tokio::test]
    async fn should_report_ok_without_polling_rtorrent() {
        let rtorrent = FakeRtorrent::new();
        rtorrent.go_down();

        let env = Environment::start(&ephemeral(), rtorrent).await;

        let response = Client::new(env.bind_address).get_health_check().await;

        assert_eq!(response.status(), 200);
        let report: Report = response.json().await.unwrap();
        assert_eq!(report, Report { status: Status::Ok });
        assert_eq!(env.rtorrent.listing_calls(), 0);

        env.stop().await;
    }
}
