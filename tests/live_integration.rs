use nexusmods_http::{ModsClient, ModsError};

#[tokio::test]
async fn live_game_lookup_and_missing_mod() {
    let client = match ModsClient::from_env() {
        Ok(client) => client,
        Err(_) => {
            eprintln!("skipping live test: NEXUSMODS_API_KEY not set");
            return;
        }
    };
    client.set_backoff_observer(|seconds: u64| {
        eprintln!("[backoff] sleeping {seconds}s due to rate-limit/network");
    });

    let game = client
        .get_game("skyrimspecialedition")
        .await
        .expect("game lookup must succeed");
    assert_eq!(game["domain_name"], "skyrimspecialedition");

    let latest = client
        .get_latest_added("skyrimspecialedition")
        .await
        .expect("latest added must succeed");
    assert!(latest.is_array());

    match client.get_mod("skyrimspecialedition", 0).await {
        Err(ModsError::Http { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected 404 for mod 0, got {other:?}"),
    }
}
