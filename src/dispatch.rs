// SPDX-License-Identifier: MIT

use crate::decision::Method;
use crate::task::Task;

/// Classical execution path. Placeholder body: the actual CPU/GPU kernel
/// is an external collaborator.
pub async fn run_classical(task: &Task) {
    log::info!("running classical computation for '{}'", task.task_type);
}

/// Quantum execution path. Placeholder body: no real quantum hardware
/// access exists.
pub async fn run_quantum(task: &Task) {
    log::info!("running quantum computation for '{}'", task.task_type);
}

/// Run the classical and quantum branches as two independent units of
/// work and return once both have completed. The branches exchange no
/// data and there is no ordering between them.
pub async fn run_hybrid<C, Q>(classical: C, quantum: Q) -> anyhow::Result<()>
where
    C: std::future::Future<Output = ()> + Send + 'static,
    Q: std::future::Future<Output = ()> + Send + 'static,
{
    let classical = tokio::task::spawn(classical);
    let quantum = tokio::task::spawn(quantum);
    let (classical_res, quantum_res) = futures::future::join(classical, quantum).await;
    classical_res?;
    quantum_res?;
    Ok(())
}

/// Execute a task with the selected method.
pub async fn dispatch(task: &Task, method: Method) -> anyhow::Result<()> {
    match method {
        Method::Cpu | Method::Gpu => run_classical(task).await,
        Method::Qpu => run_quantum(task).await,
        Method::Hybrid => {
            log::info!("running hybrid processing for '{}'", task.task_type);
            let classical_task = task.clone();
            let quantum_task = task.clone();
            run_hybrid(
                async move { run_classical(&classical_task).await },
                async move { run_quantum(&quantum_task).await },
            )
            .await?;
        }
    }
    Ok(())
}
