use cadence_framework::{
    BotConfig, ChannelKind, CommandSpec, Framework, Frequency, Message, TaskOptions,
};
use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        )
        .init();

    let mut framework: Framework<()> = Framework::new(());

    // In a real deployment this comes from BotConfig::load_toml / load_yaml.
    framework.configure(BotConfig::from_config(
        Config::builder()
            .set_override("secret_key", "demo-secret")?
            .set_override("command_prefix", "!")?
            .set_override("boot_msg", "Cadence demo bot up")?
            .build()?,
    )?);

    framework.bind(
        "ping",
        CommandSpec::new(|msg| {
            println!("pong -> {} in #{}", msg.author_id, msg.channel);
        })
        .help_message("Check that the bot is alive")
        .allow_dm(true),
    );
    framework.bind(
        "roll",
        CommandSpec::new(|msg| {
            println!("{} rolls the dice", msg.author_id);
        })
        .rate_limit(2)
        .help_message("Roll a die"),
    );

    framework.observe("message", |msg, _ctx: Option<&()>| {
        println!("observed: <{}> {}", msg.author_id, msg.content);
    });

    framework.connect()?;

    // Scheduled background work shares the framework's default context.
    framework
        .scheduler()
        .schedule(
            TaskOptions::new()
                .name("hourly-summary")
                .frequency(Frequency::Hourly)
                .once(true)
                .callback(|_ctx| async {
                    println!("[TASK] hourly summary");
                }),
        )
        .await?;

    for (name, help) in framework.registrar().help() {
        println!("  !{:<8} {}", name, help);
    }

    // Simulated inbound traffic; a platform connection would feed these.
    let inbound = [
        Message::new("alice", "general", "!ping"),
        Message::new("bob", "general", "hello everyone"),
        Message::new("bob", "general", "!roll 2d6"),
        Message::new("bot-friend", "general", "!ping").from_bot(),
        Message::new("carol", "dm", "!ping").in_kind(ChannelKind::Dm),
        Message::new("carol", "dm", "!roll").in_kind(ChannelKind::Dm),
    ];
    for msg in &inbound {
        framework.emit("message", msg);
        framework.dispatch_command(msg);
    }

    framework.disconnect();
    Ok(())
}
