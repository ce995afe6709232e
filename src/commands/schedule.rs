use anyhow::Result;
use eden_core::public::PublicSchedule;
use eden_core::storage::StorageWatcher;
use owo_colors::OwoColorize;

use crate::commands::Context;
use crate::render::{footer, render_cards};

pub async fn run(ctx: &Context, watch: bool) -> Result<()> {
    let mut public = PublicSchedule::new(ctx.storage.clone());
    public.load();
    print_schedule(public.cards());

    if !watch {
        return Ok(());
    }

    println!();
    println!("{}", "Watching for schedule changes (Ctrl-C to stop)".dimmed());

    let mut watcher = ctx.watcher();
    let mut interval = tokio::time::interval(ctx.config.watch_interval());

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let mut reloaded = false;
                for change in watcher.poll() {
                    reloaded |= public.on_change(&change);
                }
                if reloaded {
                    println!();
                    print_schedule(public.cards());
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

fn print_schedule(cards: &[eden_core::public::ScheduleCard]) {
    println!("{}", render_cards(cards));
    println!();
    println!("{}", footer());
}
