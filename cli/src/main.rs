//! Interactive terminal host for the todo view.
//!
//! Plays the host role of the sans-I/O split: executes each `HttpRequest`
//! the view hands out with ureq, feeds the outcome back into the matching
//! `finish_*` call, and re-renders the list after every state change.
//! Failures never reach this layer — the view logs and swallows them, so a
//! failed action simply shows no change.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use todo_client::{ApiError, HttpMethod, HttpRequest, HttpResponse, TodoView};
use tracing::info;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TODO_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    info!(%base_url, "connecting");

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut view = TodoView::new(&base_url);

    // Initial load gates the loading indicator, matching the view's one use
    // of `is_loading`.
    let req = view.begin_load();
    if view.is_loading() {
        println!("loading...");
    }
    view.finish_load(execute(&agent, req));
    render(&view);

    let stdin = io::stdin();
    print_prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let (command, rest) = match line.trim().split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" | "ls" => render(&view),
            "reload" => {
                let req = view.begin_load();
                view.finish_load(execute(&agent, req));
                render(&view);
            }
            "add" => {
                view.set_draft(rest);
                if let Some(req) = view.submit_draft() {
                    view.finish_create(execute(&agent, req));
                }
                render(&view);
            }
            "toggle" => match rest.parse::<i64>() {
                Ok(id) => {
                    let req = view.begin_toggle(id);
                    view.finish_toggle(id, execute(&agent, req));
                    render(&view);
                }
                Err(_) => println!("usage: toggle <id>"),
            },
            "rm" => match rest.parse::<i64>() {
                Ok(id) => {
                    let req = view.begin_remove(id);
                    view.finish_remove(id, execute(&agent, req));
                    render(&view);
                }
                Err(_) => println!("usage: rm <id>"),
            },
            "quit" | "exit" => break,
            other => println!("unknown command: {other} (ls, reload, add, toggle, rm, quit)"),
        }
        print_prompt()?;
    }

    Ok(())
}

/// Execute an `HttpRequest` with ureq. Non-success statuses come back as
/// data; transport-level failures become `ApiError::Transport` for the view
/// to log.
fn execute(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Patch, _) => agent.patch(&req.path).send_empty(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
    }
    .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

fn render(view: &TodoView) {
    if view.items().is_empty() {
        println!("(no todos)");
        return;
    }
    for todo in view.items() {
        let mark = if todo.completed { "x" } else { " " };
        println!("[{mark}] {:>4}  {}", todo.id, todo.title);
    }
    println!(
        "{} total | {} done | {} remaining",
        view.items().len(),
        view.completed_count(),
        view.remaining_count()
    );
}

fn print_prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}
