mod logging;
mod tools;

use investal_advisor::ActionPlanner;
use investal_core::{Category, EntityType, Store};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Deserialize;

fn respond(result: Result<String, String>) -> Result<CallToolResult, McpError> {
    Ok(match result {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            tracing::warn!(error = %e, "tool call failed");
            CallToolResult::error(vec![Content::text(e)])
        }
    })
}

// --- Request types ---

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct ListQuestionsRequest {
    /// Only return questions in this category, e.g. "Ingresos y Cobros". Omit for all 29.
    category: Option<Category>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct DeriveRequest {
    /// Answers as a JSON object keyed by question id, e.g. {"cuentasVencidas": "Sí", "diasCobro": 60}. Unknown ids are rejected. Omit when using `diagnostic`.
    answers: Option<String>,
    /// Name of a saved diagnostic to use instead of inline answers
    diagnostic: Option<String>,
    /// Sort key: "impact", "urgency" or "ease". Anything else keeps rule order.
    sort: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct PrioritizeRequest {
    /// Opportunities as a JSON array, exactly as returned by derive_opportunities
    opportunities: String,
    /// Sort key: "impact", "urgency" or "ease". Anything else keeps input order.
    sort: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct SimulateRequest {
    /// Average days to collect from customers. Default: from the diagnostic, else 45.
    collection_days: Option<f64>,
    /// Average annual interest rate in percent. Default: from the diagnostic, else 15.
    interest_rate: Option<f64>,
    /// Effective tax rate in percent. Default: from the diagnostic, else 30.
    tax_rate: Option<f64>,
    /// Saved diagnostic whose answers seed the lever defaults
    diagnostic: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct TaxEstimateRequest {
    /// Monthly flow in MXN
    monthly_flow: f64,
    /// "moral" (company, 30% ISR) or "fisica" (individual, 35% ISR). Default: moral.
    entity_type: Option<EntityType>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct ActionPlanRequest {
    /// Answers as a JSON object keyed by question id. Omit when using `diagnostic`.
    answers: Option<String>,
    /// Name of a saved diagnostic to use instead of inline answers
    diagnostic: Option<String>,
    /// Order opportunities by "impact", "urgency" or "ease" before planning
    sort: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct SaveAnswersRequest {
    /// Name to save the diagnostic under (letters, digits, '-', '_', '.')
    name: String,
    /// Answers as a JSON object keyed by question id
    data: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct DiagnosticRequest {
    /// Name of the saved diagnostic
    name: String,
}

// --- Server ---

#[derive(Clone)]
pub struct InvestalServer {
    tool_router: ToolRouter<Self>,
    store: Store,
    planner: ActionPlanner,
}

#[tool_router]
impl InvestalServer {
    pub fn new(store: Store, planner: ActionPlanner) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store,
            planner,
        }
    }

    #[tool(description = "List the diagnostic questionnaire: id, category, text, type (radio/number/text) and options")]
    fn list_questions(
        &self,
        Parameters(req): Parameters<ListQuestionsRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::list_questions(req.category))
    }

    #[tool(
        description = "Derive cash-flow opportunities from questionnaire answers. Returns a JSON array of {id, category, title, description, recommendation, impact, urgency, ease, tag}. Pass inline `answers` or a saved `diagnostic`, optionally with `sort`."
    )]
    fn derive_opportunities(
        &self,
        Parameters(req): Parameters<DeriveRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            tools::resolve_answers(&self.store, req.answers.as_deref(), req.diagnostic.as_deref())
                .and_then(|answers| tools::derive_opportunities(&answers, req.sort.as_deref())),
        )
    }

    #[tool(
        description = "Reorder a list of opportunities, highest first, by impact, urgency or ease. The sort is stable; any other key returns the list unchanged."
    )]
    fn prioritize_opportunities(
        &self,
        Parameters(req): Parameters<PrioritizeRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::prioritize_opportunities(&req.opportunities, &req.sort))
    }

    #[tool(
        description = "Simulate twelve months of net cash flow, baseline vs optimized, for the given collection days, interest rate and tax rate. Returns {levers, months: [{month, actual, optimized}], summary: {totalActual, totalOptimized, annualImprovement}, monthlyTaxSavings}."
    )]
    fn simulate_cashflow(
        &self,
        Parameters(req): Parameters<SimulateRequest>,
    ) -> Result<CallToolResult, McpError> {
        let answers = match req.diagnostic.as_deref() {
            Some(name) => match tools::resolve_answers(&self.store, None, Some(name)) {
                Ok(answers) => Some(answers),
                Err(e) => return respond(Err(e)),
            },
            None => None,
        };
        let levers = tools::levers_for(
            answers.as_ref(),
            req.collection_days,
            req.interest_rate,
            req.tax_rate,
        );
        respond(tools::simulate_cashflow(levers))
    }

    #[tool(
        description = "Estimate annual tax savings with the no-nominativo service (6.5% fee) versus current ISR for a monthly flow"
    )]
    fn estimate_tax_savings(
        &self,
        Parameters(req): Parameters<TaxEstimateRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::estimate_tax(
            req.monthly_flow,
            req.entity_type.unwrap_or_default(),
        ))
    }

    #[tool(
        description = "Generate a suggested 90-day action plan (Spanish, free text) for the opportunities derived from the answers. Returns a fixed message instead of a plan if the AI provider is not configured or the request fails."
    )]
    async fn generate_action_plan(
        &self,
        Parameters(req): Parameters<ActionPlanRequest>,
    ) -> Result<CallToolResult, McpError> {
        let answers = match tools::resolve_answers(
            &self.store,
            req.answers.as_deref(),
            req.diagnostic.as_deref(),
        ) {
            Ok(answers) => answers,
            Err(e) => return respond(Err(e)),
        };
        let opportunities = tools::derive_sorted(&answers, req.sort.as_deref());
        let plan = self.planner.generate_plan(&opportunities).await;
        respond(Ok(plan))
    }

    #[tool(description = "Save questionnaire answers under a name, replacing any previous diagnostic with that name")]
    fn save_answers(
        &self,
        Parameters(req): Parameters<SaveAnswersRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::save_answers(&self.store, &req.name, &req.data))
    }

    #[tool(description = "Get the saved answers of a diagnostic as a JSON object")]
    fn get_answers(
        &self,
        Parameters(req): Parameters<DiagnosticRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::get_answers(&self.store, &req.name))
    }

    #[tool(description = "List all saved diagnostics")]
    fn list_diagnostics(&self) -> Result<CallToolResult, McpError> {
        respond(tools::list_diagnostics(&self.store))
    }

    #[tool(description = "Delete a saved diagnostic")]
    fn delete_answers(
        &self,
        Parameters(req): Parameters<DiagnosticRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(tools::delete_answers(&self.store, &req.name))
    }
}

#[tool_handler]
impl ServerHandler for InvestalServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

const INSTRUCTIONS: &str = r#"Investal cash-flow diagnostic for small and medium companies.

## Workflow
1. `list_questions` to see the questionnaire. Answers are keyed by question id; radio questions take one of their listed options verbatim (e.g. "Sí", "No"), number questions take a number.
2. `save_answers` to store a company's answers under a name, or pass them inline as `answers` to the other tools.
3. `derive_opportunities` to list detected opportunities. Use `sort` ("impact", "urgency", "ease") or `prioritize_opportunities` to reorder them.
4. `simulate_cashflow` to show the twelve-month effect of collecting faster, refinancing, or lowering the effective tax rate.
5. `generate_action_plan` for an AI-written 90-day plan.
`estimate_tax_savings` is independent of the questionnaire."#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle `investal-mcp init` subcommand
    if std::env::args().nth(1).as_deref() == Some("init") {
        return init_project();
    }

    logging::init_tracing();

    let store = Store::default_location();
    let settings = store.read_settings().with_env_overrides();
    tracing::info!(
        data_dir = %store.root().display(),
        provider = %settings.provider,
        model = %settings.model,
        advisor_configured = settings.is_configured(),
        "starting investal-mcp"
    );

    let service = InvestalServer::new(store, ActionPlanner::new(settings))
        .serve(rmcp::transport::io::stdio())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "MCP server error"))?;
    service.waiting().await?;
    Ok(())
}

/// Write project-scoped MCP config files in the current directory so that
/// Claude Code and/or Codex discover investal-mcp when working in this project.
/// Only writes config for tools that are actually installed.
fn init_project() -> Result<(), Box<dyn std::error::Error>> {
    let binary_path = std::env::current_exe()?
        .canonicalize()?
        .to_string_lossy()
        .to_string();

    let cwd = std::env::current_dir()?;

    let has_claude = which::which("claude").is_ok();
    let has_codex = which::which("codex").is_ok();

    if !has_claude && !has_codex {
        eprintln!("Neither `claude` nor `codex` found in PATH.");
        eprintln!("Install Claude Code or OpenAI Codex first, then re-run `investal-mcp init`.");
        std::process::exit(1);
    }

    if has_claude {
        init_claude_code(&cwd, &binary_path)?;
    }
    if has_codex {
        init_codex(&cwd, &binary_path)?;
    }

    let clients: Vec<&str> = [
        has_claude.then_some("Claude Code"),
        has_codex.then_some("Codex"),
    ]
    .into_iter()
    .flatten()
    .collect();
    eprintln!("\nDone. {} will use investal in this project.", clients.join(" and "));

    Ok(())
}

/// Add the `investal` server to a `.mcp.json` document, keeping other servers.
fn merge_mcp_json(existing: Option<&str>, binary_path: &str) -> serde_json::Value {
    let mut root: serde_json::Value = existing
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_else(|| serde_json::json!({}));

    if !root.is_object() {
        root = serde_json::json!({});
    }
    if !root.get("mcpServers").is_some_and(|v| v.is_object()) {
        root["mcpServers"] = serde_json::json!({});
    }
    root["mcpServers"]["investal"] = serde_json::json!({
        "type": "stdio",
        "command": binary_path,
        "args": [],
    });
    root
}

/// Add the `investal` server to a Codex `config.toml`, keeping everything else.
fn merge_codex_toml(existing: Option<&str>, binary_path: &str) -> toml_edit::DocumentMut {
    let mut doc: toml_edit::DocumentMut = existing
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();

    if !doc.contains_table("mcp_servers") {
        doc["mcp_servers"] = toml_edit::Item::Table(toml_edit::Table::new());
    }

    let mut server = toml_edit::Table::new();
    server.insert("command", toml_edit::value(binary_path));
    server.insert("args", toml_edit::value(toml_edit::Array::new()));
    doc["mcp_servers"]["investal"] = toml_edit::Item::Table(server);
    doc
}

/// Write .mcp.json for Claude Code, merging with any existing config.
fn init_claude_code(
    cwd: &std::path::Path,
    binary_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mcp_json_path = cwd.join(".mcp.json");
    let existing = std::fs::read_to_string(&mcp_json_path).ok();
    let root = merge_mcp_json(existing.as_deref(), binary_path);

    std::fs::write(&mcp_json_path, serde_json::to_string_pretty(&root)?)?;
    eprintln!("Wrote {}", mcp_json_path.display());
    Ok(())
}

/// Write .codex/config.toml for OpenAI Codex, merging with any existing config.
fn init_codex(
    cwd: &std::path::Path,
    binary_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let codex_dir = cwd.join(".codex");
    let config_toml_path = codex_dir.join("config.toml");
    let existing = std::fs::read_to_string(&config_toml_path).ok();
    let doc = merge_codex_toml(existing.as_deref(), binary_path);

    std::fs::create_dir_all(&codex_dir)?;
    std::fs::write(&config_toml_path, doc.to_string())?;
    eprintln!("Wrote {}", config_toml_path.display());
    Ok(())
}
