use crate::commands::{Command, Update};
use crate::config::AppConfig;
use crate::dispatch::{ReportDocument, ReportSink, dispatch};
use crate::session::{GenerationGuard, Session};
use std::sync::Arc;
use tokio::sync::mpsc;
use workorder_core::WorkOrder;
use workorder_report::{ReportOptions, generate_report, report_file_name};

/// Async worker task that owns the session and processes commands
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<Command>,
    update_tx: mpsc::UnboundedSender<Update>,
    config: AppConfig,
) {
    let mut session = Session::new(WorkOrder::new(), config.report.limits);

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut session, &config, &update_tx);
    }
    log::debug!("Command channel closed, worker exiting");
}

fn process_command(
    cmd: Command,
    session: &mut Session,
    config: &AppConfig,
    update_tx: &mpsc::UnboundedSender<Update>,
) {
    match cmd {
        Command::Edit(edit) => {
            let update = match session.apply(edit) {
                Ok(order) => Update::Changed {
                    order: order.clone(),
                },
                Err(error) => {
                    log::debug!("Edit rejected: {}", error);
                    Update::EditRejected { error }
                }
            };
            let _ = update_tx.send(update);
        }
        Command::Reset => {
            session.reset();
            let _ = update_tx.send(Update::Changed {
                order: session.order().clone(),
            });
        }
        Command::Load(order) => {
            session.replace(order);
            let _ = update_tx.send(Update::Changed {
                order: session.order().clone(),
            });
        }
        Command::Generate { sinks } => {
            let Some(guard) = session.try_begin_generation() else {
                log::debug!("Generation already in flight, ignoring request");
                let _ = update_tx.send(Update::GenerationBusy);
                return;
            };

            let order = session.order().clone();
            let options = config.report.clone();
            let update_tx = update_tx.clone();
            tokio::spawn(async move {
                handle_generate(order, options, sinks, guard, &update_tx).await;
            });
        }
    }
}

/// Generate one report and hand it to the sinks. The guard is released
/// before the final update goes out, on success and on failure alike.
async fn handle_generate(
    order: WorkOrder,
    options: ReportOptions,
    sinks: Vec<Arc<dyn ReportSink>>,
    guard: GenerationGuard,
    update_tx: &mpsc::UnboundedSender<Update>,
) {
    let report = match generate_report(&order, &options).await {
        Ok(report) => report,
        Err(e) => {
            log::warn!("Report generation failed: {}", e);
            drop(guard);
            let _ = update_tx.send(Update::GenerationFailed {
                message: format!("Failed to generate report: {e}"),
            });
            return;
        }
    };

    let _ = update_tx.send(Update::ReportReady {
        file_name: report_file_name(&order),
        page_numbers: report.page_numbers.clone(),
        skipped: report.skipped.clone(),
        partial: report.is_partial(),
    });

    let document = ReportDocument::new(&order, &report);
    let outcomes = dispatch(&document, &sinks).await;
    drop(guard);
    let _ = update_tx.send(Update::Dispatched { outcomes });
}
