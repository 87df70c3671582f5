// src/cli.rs
//! Command-line front end. Each subcommand drives one screen controller the
//! way a user would, then prints the resulting state and any toasts.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast;

use crate::app::AppContext;
use crate::app_log;
use crate::controllers::find_jobs::RecommendationState;
use crate::controllers::job_details::{DetailsState, MatchState, SubmitOutcome};
use crate::controllers::{
    AlwaysConfirm, ApplicationsController, Confirm, Currency, DraftOutcome, FindJobsController,
    JobDetailsController, LoginController, ManageApplicantsController, PostJobController,
    RecruiterListingsController, RecruiterProfileController, SavedJobsController,
    SeekerProfileController, SignupController,
};
use crate::core::ClientConfig;
use crate::services::jobs::JobAction;
use crate::types::application::ApplicationRequest;
use crate::types::{ApplicationStatus, JobId, PreferenceGroup, Role};
use crate::upload_validator::UploadFile;
use crate::utils::{format_date, DateStyle};
use crate::widgets::{nav_items, NavbarUser, Toast, ToastKind};

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(about = "Browse, apply for and manage job postings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./jobboard.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        email: String,
        #[arg(long, env = "JOBBOARD_PASSWORD")]
        password: String,
    },
    /// Create an account
    Signup {
        name: String,
        email: String,
        #[arg(long, env = "JOBBOARD_PASSWORD")]
        password: String,
        #[arg(long, default_value = "SEEKER")]
        role: Role,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user and their navigation
    Whoami,
    /// Search open positions
    Jobs {
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long = "type")]
        job_type: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Also show recommendations for a complete profile
        #[arg(long)]
        recommend: bool,
    },
    /// Work with a single posting
    Job {
        #[command(subcommand)]
        command: JobCommand,
    },
    /// List bookmarked jobs
    Saved {
        /// Remove this job from the bookmarks
        #[arg(long)]
        remove: Option<JobId>,
    },
    /// List your applications and local drafts
    Applications {
        #[arg(long)]
        status: Option<ApplicationStatus>,
        /// Re-send the locally kept draft for this job
        #[arg(long)]
        resubmit: Option<JobId>,
    },
    /// Seeker profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Recruiter tools
    Recruiter {
        #[command(subcommand)]
        command: RecruiterCommand,
    },
}

#[derive(Subcommand)]
pub enum JobCommand {
    Show { id: JobId },
    Apply(ApplyArgs),
    /// Check how well your profile fits the job
    Match { id: JobId },
    /// Toggle the bookmark
    Bookmark { id: JobId },
}

#[derive(Args)]
pub struct ApplyArgs {
    pub id: JobId,
    #[arg(long)]
    pub phone: String,
    /// Overrides the name prefilled from your profile
    #[arg(long)]
    pub name: Option<String>,
    /// Overrides the email prefilled from your profile
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub experience: u32,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub cover_letter: Option<String>,
}

impl ApplyArgs {
    /// Layer the command-line values over the prefilled form.
    pub fn fill(self, form: &mut ApplicationRequest) {
        if let Some(name) = self.name {
            form.full_name = name;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        form.phone = self.phone;
        form.years_of_experience = self.experience;
        form.current_company = self.company.unwrap_or_default();
        form.cover_letter = self.cover_letter.unwrap_or_default();
    }
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    Show,
    Set {
        #[arg(long)]
        bio: Option<String>,
        /// Comma-separated
        #[arg(long)]
        skills: Option<String>,
    },
    UploadResume { path: PathBuf },
    UploadAvatar { path: PathBuf },
    /// Fetch AI feedback for the profile
    Review,
}

#[derive(Subcommand)]
pub enum RecruiterCommand {
    Listings,
    Pause { id: JobId },
    Resume { id: JobId },
    Close { id: JobId },
    Reopen { id: JobId },
    Delete { id: JobId },
    Applicants {
        #[arg(long)]
        job: Option<JobId>,
    },
    Status { id: i64, status: ApplicationStatus },
    Reset { id: i64 },
    /// Post a new job, or edit one with --edit
    Post {
        #[arg(long)]
        edit: Option<JobId>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Amount without the currency symbol
        #[arg(long)]
        salary: Option<String>,
        #[arg(long)]
        currency: Option<Currency>,
        #[arg(long = "type")]
        job_type: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        requirements: Option<String>,
        #[arg(long)]
        department: Option<String>,
    },
    Profile {
        /// Toggle a preferred role
        #[arg(long)]
        role: Vec<String>,
        /// Toggle a preferred experience level
        #[arg(long)]
        level: Vec<String>,
        /// Toggle a preferred work location
        #[arg(long)]
        location: Vec<String>,
        #[arg(long)]
        company: Option<String>,
    },
}

/// Reads y/n from the terminal.
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let mut stdout = tokio::io::stdout();
        if stdout.write_all(format!("{} [y/N] ", prompt).as_bytes()).await.is_err() {
            return false;
        }
        let _ = stdout.flush().await;

        let mut line = String::new();
        match BufReader::new(tokio::io::stdin()).read_line(&mut line).await {
            Ok(_) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                app_log!(warn, "Could not read confirmation: {}", e);
                false
            }
        }
    }
}

pub async fn run(cli: Cli, config: ClientConfig) -> Result<()> {
    let ctx = AppContext::connect(&config).await?;
    let confirm = confirmer(cli.yes);

    let mut toasts = ctx.notifier.subscribe();
    let result = dispatch(cli.command, &ctx, confirm).await;
    print_toasts(&mut toasts);
    result
}

/// `--yes` skips every prompt; otherwise each destructive action asks on
/// the terminal.
pub fn confirmer(yes: bool) -> Arc<dyn Confirm> {
    if yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(StdinConfirm)
    }
}

async fn dispatch(command: Command, ctx: &AppContext, confirm: Arc<dyn Confirm>) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let mut screen = LoginController::new(ctx.clone());
            screen.email = email;
            screen.password = password;
            match screen.submit().await? {
                Some(route) => println!("Signed in. Dashboard: {}", route),
                None => bail!(screen.error_message.take().unwrap_or_default()),
            }
        }

        Command::Signup {
            name,
            email,
            password,
            role,
        } => {
            let mut screen = SignupController::new(ctx.clone());
            screen.name = name;
            screen.email = email;
            screen.password = password;
            screen.select_role(role);
            match screen.submit().await? {
                Some(route) => println!("Account created. Dashboard: {}", route),
                None => bail!(screen.error_message.take().unwrap_or_default()),
            }
        }

        Command::Logout => {
            ctx.services.auth.logout().await?;
            println!("Signed out.");
        }

        Command::Whoami => match ctx.session.current_user() {
            Some(user) => {
                let navbar = NavbarUser::from_user(&user);
                println!("{} [{}] {} <{}>", navbar.initials(), navbar.role_label, user.name, user.email);
                for item in nav_items(user.role) {
                    println!("  {:<20} {}", item.label, item.route);
                }
            }
            None => println!("Not signed in."),
        },

        Command::Jobs {
            keyword,
            job_type,
            location,
            recommend,
        } => {
            let mut screen = FindJobsController::new(ctx.clone());
            screen.keyword = keyword.unwrap_or_default();
            screen.job_type = job_type.unwrap_or_default();
            screen.location = location.unwrap_or_default();
            screen.load_jobs().await?;
            if let Some(message) = &screen.error_message {
                bail!(message.clone());
            }
            for job in screen.jobs() {
                println!(
                    "#{:<5} {:<32} {:<20} {:<18} {:<10} {}",
                    job.id, job.title, job.company, job.location, job.job_type, job.salary
                );
            }
            if recommend {
                screen.load_recommendations().await?;
                match &screen.recommendations {
                    RecommendationState::Ready(items) if !items.is_empty() => {
                        println!("\nRecommended for you:");
                        for item in items {
                            println!("  #{:<5} {:<32} {}% match", item.job_id, item.title, item.match_score);
                        }
                    }
                    RecommendationState::Ready(_) => println!("\nNo recommendations yet."),
                    RecommendationState::ProfileIncomplete => {
                        println!("\nComplete your profile (bio, skills, resume) to get recommendations.")
                    }
                    RecommendationState::Failed(message) => println!("\n{}", message),
                    RecommendationState::Idle | RecommendationState::Loading => {}
                }
            }
        }

        Command::Job { command } => job_command(command, ctx).await?,

        Command::Saved { remove } => {
            let mut screen = SavedJobsController::new(ctx.clone());
            screen.activate().await?;
            if let Some(id) = remove {
                if !screen.remove(id).await? {
                    println!("Job #{} was not saved.", id);
                }
            }
            if screen.is_empty() {
                println!("No saved jobs.");
            }
            for job in &screen.jobs {
                println!("#{:<5} {:<32} {:<20} {}", job.id, job.title, job.company, job.status);
            }
        }

        Command::Applications { status, resubmit } => {
            let mut screen = ApplicationsController::new(ctx.clone());
            screen.activate().await?;
            if let Some(message) = &screen.error_message {
                bail!(message.clone());
            }
            if let Some(job_id) = resubmit {
                match screen.resubmit_draft(job_id).await? {
                    DraftOutcome::Missing => println!("No draft for job #{}.", job_id),
                    DraftOutcome::Kept(message) => println!("Draft kept: {}", message),
                    DraftOutcome::Submitted | DraftOutcome::Rejected(_) => {}
                }
            }
            screen.status_filter = status;
            for application in screen.visible() {
                println!(
                    "#{:<5} {:<32} {:<20} {:<14} {}",
                    application.id,
                    application.job_title.as_deref().unwrap_or("(unavailable)"),
                    application.company.as_deref().unwrap_or(""),
                    application.status.label(),
                    format_date(&application.applied_date, DateStyle::Short)
                );
            }
            if !screen.drafts.is_empty() {
                println!("\nDrafts kept on this device:");
                for draft in &screen.drafts {
                    println!(
                        "  job #{:<5} saved {}",
                        draft.request.job_id,
                        draft.saved_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }

        Command::Profile { command } => profile_command(command, ctx).await?,

        Command::Recruiter { command } => recruiter_command(command, ctx, confirm).await?,
    }
    Ok(())
}

async fn job_command(command: JobCommand, ctx: &AppContext) -> Result<()> {
    let mut screen = JobDetailsController::new(ctx.clone());
    let id = match &command {
        JobCommand::Show { id }
        | JobCommand::Match { id }
        | JobCommand::Bookmark { id } => *id,
        JobCommand::Apply(args) => args.id,
    };
    screen.activate(id).await?;

    let job = match &screen.state {
        DetailsState::Loaded(job) => job.clone(),
        DetailsState::NotFound => bail!("Job #{} not found", id),
        DetailsState::Error(message) => bail!(message.clone()),
        DetailsState::Loading => return Ok(()),
    };

    match command {
        JobCommand::Show { .. } => {
            println!("{} at {}", job.title, job.company);
            println!("{} | {} | {}", job.location, job.job_type, job.salary);
            println!("Posted {} | {} applicants", format_date(&job.posted_date, DateStyle::Long), job.applicants_count);
            if screen.is_bookmarked {
                println!("(saved)");
            }
            println!("\n{}", job.description);
            for requirement in job.requirement_list() {
                println!("  - {}", requirement);
            }
        }

        JobCommand::Apply(args) => {
            screen.apply_now().await?;
            args.fill(&mut screen.form);

            match screen.submit_application().await? {
                SubmitOutcome::Submitted => {}
                SubmitOutcome::Invalid(missing) => bail!("Missing required fields: {}", missing.join(", ")),
                SubmitOutcome::SignInRequired => bail!("Sign in first"),
                SubmitOutcome::Rejected(message) => bail!(message),
                SubmitOutcome::Failed { message, draft_saved } => {
                    if draft_saved {
                        println!("Kept as a draft; resend with `jobboard applications --resubmit {}`", id);
                    }
                    bail!(message)
                }
                SubmitOutcome::NotAvailable => bail!("This job is not accepting applications"),
            }
        }

        JobCommand::Match { .. } => {
            screen.check_compatibility().await?;
            if let MatchState::Shown(result) = &screen.match_state {
                let label = result.label();
                println!("{}% {} match ({})", result.match_score, label, label.tone().color_token());
                println!(
                    "  skills {}% | experience {}% | profile {}%",
                    result.skill_score, result.experience_score, result.profile_score
                );
                if !result.feedback.is_empty() {
                    println!("  {}", result.feedback);
                }
            }
        }

        JobCommand::Bookmark { .. } => {
            if let Some(saved) = screen.toggle_bookmark().await? {
                println!("Job #{} {}", id, if saved { "saved" } else { "removed from saved jobs" });
            }
        }
    }
    Ok(())
}

async fn profile_command(command: ProfileCommand, ctx: &AppContext) -> Result<()> {
    let mut screen = SeekerProfileController::with_saved_feedback(ctx.clone());
    screen.activate().await?;
    if let Some(message) = &screen.error_message {
        bail!(message.clone());
    }

    match command {
        ProfileCommand::Show => {
            println!("Bio:    {}", screen.bio);
            println!("Skills: {}", screen.skills().join(", "));
            println!("Resume: {}", screen.resume_url);
            println!("Avatar: {}", screen.avatar());
            println!("Complete: {}", if screen.is_complete() { "yes" } else { "no" });
            if let Some(feedback) = &screen.ai_feedback {
                println!("Strengths: {}", feedback.strengths.join(", "));
                println!("Market fit: {}", feedback.market_fit);
            }
        }
        ProfileCommand::Set { bio, skills } => {
            if let Some(bio) = bio {
                screen.bio = bio;
            }
            if let Some(skills) = skills {
                screen.skills_text = skills;
            }
            screen.save().await?;
        }
        ProfileCommand::UploadResume { path } => {
            let file = UploadFile::from_path(&path).await?;
            if screen.upload_resume(file).await? {
                screen.save().await?;
            }
        }
        ProfileCommand::UploadAvatar { path } => {
            let file = UploadFile::from_path(&path).await?;
            if screen.upload_avatar(file).await? {
                screen.save().await?;
            }
        }
        ProfileCommand::Review => {
            screen.run_review().await?;
            match &screen.ai_feedback {
                Some(feedback) => {
                    println!("Strengths: {}", feedback.strengths.join(", "));
                    println!("Market fit: {}", feedback.market_fit);
                }
                None => bail!(screen.error_message.clone().unwrap_or_default()),
            }
        }
    }
    Ok(())
}

async fn recruiter_command(
    command: RecruiterCommand,
    ctx: &AppContext,
    confirm: Arc<dyn Confirm>,
) -> Result<()> {
    match command {
        RecruiterCommand::Listings => {
            let mut screen = RecruiterListingsController::new(ctx.clone(), confirm);
            screen.refresh().await?;
            print_listings(&screen)?;
        }

        RecruiterCommand::Pause { id } => job_action(ctx, confirm, id, JobAction::Pause).await?,
        RecruiterCommand::Resume { id } => job_action(ctx, confirm, id, JobAction::Resume).await?,
        RecruiterCommand::Close { id } => job_action(ctx, confirm, id, JobAction::Close).await?,
        RecruiterCommand::Reopen { id } => job_action(ctx, confirm, id, JobAction::Reopen).await?,

        RecruiterCommand::Delete { id } => {
            let mut screen = RecruiterListingsController::new(ctx.clone(), confirm);
            screen.refresh().await?;
            screen.delete(id).await?;
            print_listings(&screen)?;
        }

        RecruiterCommand::Applicants { job } => {
            let mut screen = ManageApplicantsController::new(ctx.clone(), confirm);
            screen.job_filter = job;
            screen.activate().await?;
            print_applicants(&screen)?;
        }

        RecruiterCommand::Status { id, status } => {
            let mut screen = ManageApplicantsController::new(ctx.clone(), confirm);
            screen.activate().await?;
            screen.update_status(id, status).await?;
            print_applicants(&screen)?;
        }

        RecruiterCommand::Reset { id } => {
            let mut screen = ManageApplicantsController::new(ctx.clone(), confirm);
            screen.activate().await?;
            screen.reset_status(id).await?;
            print_applicants(&screen)?;
        }

        RecruiterCommand::Post {
            edit,
            title,
            company,
            location,
            salary,
            currency,
            job_type,
            description,
            requirements,
            department,
        } => {
            let mut screen = PostJobController::new(ctx.clone());
            if let Some(id) = edit {
                screen.load_for_edit(id).await?;
                if let Some(message) = &screen.error_message {
                    bail!(message.clone());
                }
            }
            let form = &mut screen.form;
            set_if_some(&mut form.title, title);
            set_if_some(&mut form.company, company);
            set_if_some(&mut form.location, location);
            set_if_some(&mut form.salary, salary);
            set_if_some(&mut form.job_type, job_type);
            set_if_some(&mut form.description, description);
            set_if_some(&mut form.requirements, requirements);
            set_if_some(&mut form.department, department);
            if let Some(currency) = currency {
                form.currency = currency;
            }

            match screen.submit().await? {
                Some(route) => println!("{} ({})", screen.success_message.clone().unwrap_or_default(), route),
                None => bail!(screen.error_message.clone().unwrap_or_default()),
            }
        }

        RecruiterCommand::Profile {
            role,
            level,
            location,
            company,
        } => {
            let mut screen = RecruiterProfileController::new(ctx.clone());
            screen.activate().await?;
            if let Some(message) = &screen.error_message {
                bail!(message.clone());
            }

            let toggles = [
                (PreferenceGroup::Roles, role),
                (PreferenceGroup::ExperienceLevels, level),
                (PreferenceGroup::Locations, location),
            ];
            let mut changed = company.is_some();
            for (group, items) in toggles {
                for item in items {
                    screen.toggle_selection(group, &item);
                    changed = true;
                }
            }
            if let Some(company) = company {
                screen.profile.company.name = company;
            }
            if changed {
                screen.toggle_edit();
                screen.save().await?;
            }

            let profile = &screen.profile;
            println!("{} <{}>", profile.recruiter.name, profile.recruiter.email);
            println!("Company:     {}", profile.company.name);
            for group in [PreferenceGroup::Roles, PreferenceGroup::ExperienceLevels, PreferenceGroup::Locations] {
                let marks: Vec<String> = RecruiterProfileController::options(group)
                    .iter()
                    .map(|option| {
                        let mark = if screen.is_selected(group, option) { "x" } else { " " };
                        format!("[{}] {}", mark, option)
                    })
                    .collect();
                println!("{:<12} {}", format!("{:?}:", group), marks.join("  "));
            }
        }
    }
    Ok(())
}

async fn job_action(ctx: &AppContext, confirm: Arc<dyn Confirm>, id: JobId, action: JobAction) -> Result<()> {
    let mut screen = RecruiterListingsController::new(ctx.clone(), confirm);
    screen.apply_action(id, action).await?;
    print_listings(&screen)
}

fn set_if_some(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn print_listings(screen: &RecruiterListingsController) -> Result<()> {
    if let Some(message) = &screen.error_message {
        bail!(message.clone());
    }
    for card in screen.stat_cards() {
        print!("{}: {}   ", card.label, card.value);
    }
    println!();
    for job in &screen.jobs {
        println!(
            "#{:<5} {:<32} {:<8} {:>3} applicants  {}",
            job.id,
            job.title,
            job.status,
            job.applicants_count,
            format_date(&job.posted_date, DateStyle::Short)
        );
    }
    Ok(())
}

fn print_applicants(screen: &ManageApplicantsController) -> Result<()> {
    if let Some(message) = &screen.error_message {
        bail!(message.clone());
    }
    let counts = screen.counts();
    println!(
        "Applied: {}  Shortlisted: {}  Interview: {}  Hired: {}",
        counts.applied, counts.shortlisted, counts.interview, counts.hired
    );
    for applicant in screen.visible() {
        println!(
            "#{:<5} {:<4} {:<24} {:<28} job #{:<5} {:<12} {}",
            applicant.id,
            ManageApplicantsController::initials(applicant),
            applicant.full_name,
            applicant.email,
            applicant.job_id,
            applicant.status.label(),
            format_date(&applicant.applied_date, DateStyle::Numeric)
        );
    }
    Ok(())
}

fn print_toasts(toasts: &mut broadcast::Receiver<Toast>) {
    while let Ok(toast) = toasts.try_recv() {
        let marker = match toast.kind {
            ToastKind::Success => "✅",
            ToastKind::Error => "❌",
            ToastKind::Warning => "⚠️ ",
            ToastKind::Info => "ℹ️ ",
        };
        println!("{} {}", marker, toast.message);
    }
}
