//! # Uniboard Review Console
//!
//! The entry point that assembles the storage and notifier adapters, the
//! review ledger, and the review workflow into an interactive moderation
//! session. Any chat or HTTP front end could drive the same four workflow
//! operations; this console is the reference driver.

use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing_subscriber::EnvFilter;

use configs::Settings;
use domains::{AccessLevel, SubmissionStore, UserDirectory, UserId};
use notify_adapters::TracingNotifier;
use services::{notify, AccessService, NextReview, ReviewLedger, ReviewWorkflow};
use storage_adapters::SqliteSubmissionRepo;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("loading settings")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    // 1. Storage adapter (both ports live on one pool)
    let repo = Arc::new(
        SqliteSubmissionRepo::connect(&settings.database_url)
            .await
            .context("opening the submission database")?,
    );
    let store: Arc<dyn SubmissionStore> = repo.clone();
    let users: Arc<dyn UserDirectory> = repo.clone();

    // 2. One ledger instance for the lifetime of the process
    let ledger = Arc::new(ReviewLedger::new());

    // 3. The workflow, access management, and the notice sink
    let workflow = ReviewWorkflow::new(Arc::clone(&store), Arc::clone(&users), ledger);
    let access = AccessService::new(Arc::clone(&users));
    let notifier = TracingNotifier::new();

    let term = Term::stdout();
    print_banner(&term)?;

    let admin_id: i64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Admin user id")
        .interact_text()?;
    let admin = UserId(admin_id);
    users.ensure_user(admin).await?;

    loop {
        println!();
        let options = vec![
            "📥 Next submission to review",
            "✅ Accept current",
            "❌ Reject current",
            "✏️  Edit current",
            "🔍 Search confirmed",
            "⭐ Promote a user",
            "🛑 Exit",
        ];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact_on(&term)?;

        let outcome = match selection {
            0 => next_submission(&workflow, admin).await,
            1 => accept_current(&workflow, &notifier, admin).await,
            2 => reject_current(&workflow, &notifier, admin).await,
            3 => edit_current(&workflow, admin).await,
            4 => search_confirmed(store.as_ref()).await,
            5 => promote_user(&access, admin).await,
            6 => {
                println!("{}", "👋 خداحافظ".bright_blue());
                break;
            }
            _ => unreachable!(),
        };
        if let Err(err) = outcome {
            println!("{} {err}", "error:".bright_red());
        }
    }

    Ok(())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!("{}", "╔══════════════════════════════════╗".bright_cyan());
    println!("{}", "║   Uniboard Review Console        ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════╝".bright_cyan());
    Ok(())
}

async fn next_submission(workflow: &ReviewWorkflow, admin: UserId) -> Result<()> {
    match workflow.request_next(admin).await? {
        NextReview::Assigned(submission) => {
            println!("{} {submission}", "under review:".bright_green());
            println!("  {}", submission.description);
        }
        NextReview::QueueEmpty => {
            println!("{}", "فایل تایید نشده‌ای باقی نمانده است.".yellow());
        }
    }
    Ok(())
}

async fn accept_current(
    workflow: &ReviewWorkflow,
    notifier: &TracingNotifier,
    admin: UserId,
) -> Result<()> {
    let Some(current) = workflow.ledger().active_submission_for(admin) else {
        println!("{}", "no submission under review — ask for the next one".yellow());
        return Ok(());
    };
    let accepted = workflow.accept(current, admin).await?;
    notify::dispatch(notifier, &accepted.notice).await;
    println!("{} {}", "تایید شد. 🍾".bright_green(), accepted.submission);
    Ok(())
}

async fn reject_current(
    workflow: &ReviewWorkflow,
    notifier: &TracingNotifier,
    admin: UserId,
) -> Result<()> {
    if workflow.ledger().active_submission_for(admin).is_none() {
        println!("{}", "no submission under review — ask for the next one".yellow());
        return Ok(());
    }
    let reason: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("علت رد شدن را وارد کنید")
        .interact_text()?;
    let rejected = workflow.reject(admin, &reason).await?;
    notify::dispatch(notifier, &rejected.notice).await;
    println!("{} {}", "رد شد. ❌".bright_red(), rejected.submission);
    Ok(())
}

async fn edit_current(workflow: &ReviewWorkflow, admin: UserId) -> Result<()> {
    let Some(current) = workflow.ledger().active_submission_for(admin) else {
        println!("{}", "no submission under review — ask for the next one".yellow());
        return Ok(());
    };
    let submission = workflow.edit(current).await?;
    println!("{} {submission}", "Coming Soon!".bright_yellow());
    Ok(())
}

async fn promote_user(access: &AccessService, admin: UserId) -> Result<()> {
    let target: i64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Target user id")
        .interact_text()?;
    let levels = [
        AccessLevel::Ordinary,
        AccessLevel::Contributor,
        AccessLevel::Editor,
        AccessLevel::Admin,
        AccessLevel::Owner,
    ];
    let labels: Vec<_> = levels.iter().map(|l| l.as_str()).collect();
    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("New access level")
        .items(&labels)
        .default(0)
        .interact()?;
    access.promote(admin, UserId(target), levels[picked]).await?;
    println!("{}", "access level updated".bright_green());
    Ok(())
}

async fn search_confirmed(store: &dyn SubmissionStore) -> Result<()> {
    let query: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("جستجو")
        .interact_text()?;
    let results = store.search_confirmed(&query).await?;
    if results.is_empty() {
        println!("{}", "نتیجه‌ای یافت نشد.".yellow());
        return Ok(());
    }
    for submission in results {
        println!("• {} — {}", submission, submission.search_text);
    }
    Ok(())
}
