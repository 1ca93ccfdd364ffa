// SPDX-License-Identifier: MPL-2.0
use pos_toasts::config;
use pos_toasts::diagnostics::DiagnosticsCollector;
use pos_toasts::error::Result;
use pos_toasts::notifications::{
    Kind, Lifetime, NotificationSettings, ToastQueue, ToastService, ToastView, TokioClock,
};
use std::path::PathBuf;

const HELP: &str = "\
pos-toasts: toast notification queue demo

USAGE:
  pos-toasts [OPTIONS]

OPTIONS:
  --config-dir DIR     Read settings.toml from DIR
  --duration-ms N      Override the default toast lifetime (<= 0 persists)
  --dump-config        Print the effective configuration and exit
  -h, --help           Print help
";

struct Flags {
    config_dir: Option<PathBuf>,
    duration_ms: Option<i64>,
    dump_config: bool,
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }
    Ok(Some(Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        duration_ms: args.opt_value_from_str("--duration-ms")?,
        dump_config: args.contains("--dump-config"),
    }))
}

fn print_rows(rows: &[ToastView]) {
    if rows.is_empty() {
        println!("  (no notifications)");
    }
    for row in rows {
        let remaining = row
            .remaining_ms
            .map_or_else(|| "until dismissed".to_string(), |ms| format!("{ms} ms left"));
        println!(
            "  [{}] {} {}: {} ({remaining})",
            row.id, row.kind, row.title, row.message
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => return Ok(()),
        Err(err) => {
            eprintln!("Error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    let (mut config, warning) = config::load_with_override(flags.config_dir);
    if let Some(warning) = warning {
        eprintln!("[WARN] {warning}: using default settings");
    }
    if let Some(ms) = flags.duration_ms {
        config.notifications.default_duration_ms = Some(ms);
    }

    if flags.dump_config {
        let rendered = toml::to_string_pretty(&config)?;
        print!("{rendered}");
        return Ok(());
    }

    let mut collector = DiagnosticsCollector::new(config.diagnostics.buffer_capacity());
    let mut queue =
        ToastQueue::with_settings(NotificationSettings::from(&config.notifications), TokioClock);
    queue.set_diagnostics(collector.handle());

    let (toasts, task) = ToastService::spawn(queue);
    let mut updates = toasts.subscribe();

    toasts.notify_success("Sale #1042 recorded", None).await?;
    toasts
        .notify_warning("Only 2 units of SKU 8841 left", Some("Low stock"))
        .await?;
    toasts.notify_info("Catalog synced", None).await?;
    let error = toasts
        .notify(
            Kind::Error,
            "Receipt printer offline",
            None,
            Some(Lifetime::Persistent),
        )
        .await?;

    println!("Active notifications:");
    print_rows(&toasts.snapshot().await?);

    // Watch the timed toasts retire until only persistent ones remain.
    loop {
        let rows = updates.borrow_and_update().clone();
        if rows.iter().all(ToastView::is_persistent) {
            break;
        }
        if updates.changed().await.is_err() {
            break;
        }
        println!("Update:");
        print_rows(&updates.borrow());
    }

    toasts.dismiss(error).await?;
    println!("After dismissing the printer error:");
    print_rows(&toasts.snapshot().await?);

    toasts.shutdown().await?;
    if let Err(err) = task.await {
        eprintln!("Toast service ended abnormally: {err}");
    }

    collector.process_pending();
    println!("Diagnostics ({} events):", collector.len());
    for event in collector.events() {
        println!("  {} {}", event.timestamp.format("%H:%M:%S%.3f"), event.kind);
    }
    Ok(())
}
