use super::dispatcher::ReminderDispatcher;
use crate::error::CoopError;
use crate::shared::{
    auth::protect_cron_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use coop_reminders_api_structs::dispatch_reminders::*;
use coop_reminders_domain::{DispatchSummary, ReminderRecord, TaskCollection, UserDirectory};
use coop_reminders_infra::CoopContext;
use tracing::{error, info};

pub async fn dispatch_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<CoopContext>,
) -> Result<HttpResponse, CoopError> {
    protect_cron_route(&http_req, &ctx)?;

    let usecase = DispatchRemindersUseCase {
        trigger: DispatchTrigger::Http,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.dispatched_at, res.summary)))
        .map_err(CoopError::from)
}

#[derive(Debug)]
pub enum DispatchTrigger {
    JobScheduler,
    Http,
}

/// One reminder run over every task collection and both meeting
/// collections, strictly one record after another
#[derive(Debug)]
pub struct DispatchRemindersUseCase {
    pub trigger: DispatchTrigger,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub dispatched_at: i64,
    pub summary: DispatchSummary,
}

/// Nothing stops a run. Failures are logged and counted in the summary.
#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for CoopError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

async fn load_user_directory(ctx: &CoopContext) -> Result<UserDirectory, anyhow::Error> {
    let users = ctx.repos.users.find_all().await?;
    Ok(UserDirectory::new(users))
}

#[async_trait::async_trait(?Send)]
impl UseCase for DispatchRemindersUseCase {
    type Response = UseCaseResponse;
    type Error = UseCaseError;

    const NAME: &'static str = "DispatchReminders";

    async fn execute(&mut self, ctx: &CoopContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();

        // Explicit emails on records still work without the directory
        let (directory, directory_failed) = match load_user_directory(ctx).await {
            Ok(directory) => (directory, false),
            Err(e) => {
                error!("Unable to load the user directory: {:?}", e);
                (UserDirectory::default(), true)
            }
        };

        let mut dispatcher = ReminderDispatcher::new(ctx, &directory, now);
        if directory_failed {
            dispatcher.fetch_failed();
        }

        for collection in TaskCollection::ALL.iter() {
            match ctx.repos.tasks.find_all(*collection).await {
                Ok(tasks) => {
                    for task in &tasks {
                        dispatcher.dispatch(ReminderRecord::Task(task)).await;
                    }
                }
                Err(e) => {
                    error!("Unable to fetch {}: {:?}", collection, e);
                    dispatcher.fetch_failed();
                }
            }
        }

        match ctx.repos.admin_meetings.find_all().await {
            Ok(meetings) => {
                for meeting in &meetings {
                    dispatcher.dispatch(ReminderRecord::AdminMeeting(meeting)).await;
                }
            }
            Err(e) => {
                error!("Unable to fetch admin meetings: {:?}", e);
                dispatcher.fetch_failed();
            }
        }

        match ctx.repos.employee_meetings.find_all().await {
            Ok(meetings) => {
                for meeting in &meetings {
                    dispatcher
                        .dispatch(ReminderRecord::EmployeeMeeting(meeting))
                        .await;
                }
            }
            Err(e) => {
                error!("Unable to fetch employee meetings: {:?}", e);
                dispatcher.fetch_failed();
            }
        }

        let summary = dispatcher.into_summary();
        info!(
            "Reminder run ({:?}) finished: {:?}",
            self.trigger, summary
        );

        Ok(UseCaseResponse {
            dispatched_at: now,
            summary,
        })
    }
}
