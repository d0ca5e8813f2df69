use nexusmods_http::ModsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(api_key), Some(game)) = (args.next(), args.next()) else {
        eprintln!("Usage: latest_added <API_KEY> <game_domain_name>");
        eprintln!("Example: latest_added MY_API_KEY cyberpunk2077");
        std::process::exit(1);
    };

    let client = ModsClient::new(api_key);
    client.set_backoff_observer(|seconds: u64| {
        eprintln!("[backoff] sleeping {seconds}s due to rate-limit/network");
    });

    let latest = match client.get_latest_added(&game).await {
        Ok(latest) => latest,
        Err(err) => {
            eprintln!("Failed to get latest added mods for game {game}: {err}");
            std::process::exit(2);
        }
    };
    println!("Latest added for {game}:");
    println!("{}", serde_json::to_string_pretty(&latest)?);

    let first_mod = latest
        .as_array()
        .and_then(|mods| mods.first())
        .and_then(|entry| entry.get("mod_id"))
        .and_then(|id| id.as_u64());

    if let Some(mod_id) = first_mod {
        println!("Fetching files for mod_id={mod_id}");
        match client.list_mod_files(&game, mod_id, ()).await {
            Ok(files) => println!("{}", serde_json::to_string_pretty(&files)?),
            Err(err) => eprintln!("Failed to get files for mod {mod_id}: {err}"),
        }
    }

    Ok(())
}
