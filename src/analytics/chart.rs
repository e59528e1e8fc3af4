//! Population charts as standalone HTML pages with Chart.js

use crate::analytics::report::describe_trend;
use crate::analytics::stats::summarize_population;
use crate::data::{PopulationLog, Species};
use crate::error::ReportResult;
use minijinja::{context, Environment};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const TEMPLATE_NAME: &str = "population.html";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ scenario }} - Population</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        :root {
            --bg-primary: #0a0a0a;
            --bg-card: #1c1c1c;
            --text-primary: #ffffff;
            --text-secondary: #888888;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }

        header { text-align: center; padding: 2.5rem 2rem 1.5rem; }
        header h1 { font-size: 2.25rem; font-weight: 800; }
        header .timestamp { font-size: 0.875rem; color: rgba(255,255,255,0.4); }

        .chart-card {
            background: var(--bg-card);
            border-radius: 1.25rem;
            padding: 2rem;
            border: 1px solid rgba(255, 255, 255, 0.06);
            margin-bottom: 2rem;
        }

        .chart-container { position: relative; height: 450px; width: 100%; }

        .trend { color: var(--text-secondary); margin-top: 1rem; }
        .trend strong { color: var(--text-primary); }
    </style>
</head>
<body>
    <header>
        <h1>{{ scenario }}</h1>
        <p class="timestamp">{{ ticks }} ticks &middot; Generated: {{ timestamp }}</p>
    </header>

    <div class="container">
        <div class="chart-card">
            <div class="chart-container">
                <canvas id="populationChart"></canvas>
            </div>
            <p class="trend"><strong>SQUIRREL</strong> {{ squirrel_trend }}</p>
            <p class="trend"><strong>HAWK</strong> {{ hawk_trend }}</p>
        </div>
    </div>

    <script>
        Chart.defaults.color = '#888888';
        Chart.defaults.borderColor = 'rgba(255, 255, 255, 0.08)';

        const ctx = document.getElementById('populationChart').getContext('2d');
        new Chart(ctx, {
            type: 'line',
            data: {
                labels: {{ ticks_json|safe }},
                datasets: [
                    {
                        label: 'SQUIRREL',
                        data: {{ squirrel_json|safe }},
                        yAxisID: 'y',
                        borderColor: '#10b981',
                        borderWidth: 2,
                        pointRadius: 0,
                        spanGaps: false
                    },
                    {
                        label: 'HAWK',
                        data: {{ hawk_json|safe }},
                        yAxisID: 'y1',
                        borderColor: '#ef4444',
                        borderWidth: 2,
                        pointRadius: 0,
                        spanGaps: false
                    }
                ]
            },
            options: {
                responsive: true,
                maintainAspectRatio: false,
                animation: false,
                interaction: { intersect: false, mode: 'index' },
                scales: {
                    x: {
                        ticks: { maxTicksLimit: 20 },
                        title: { display: true, text: 'Tick' }
                    },
                    y: {
                        position: 'left',
                        beginAtZero: true,
                        title: { display: true, text: 'SQUIRREL' }
                    },
                    y1: {
                        position: 'right',
                        beginAtZero: true,
                        grid: { drawOnChartArea: false },
                        title: { display: true, text: 'HAWK' }
                    }
                }
            }
        });
    </script>
</body>
</html>
"#;

/// Render the dual-axis population chart page for one scenario.
pub fn render_population_chart(scenario_name: &str, log: &PopulationLog) -> ReportResult<String> {
    let summary = summarize_population(log);

    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;
    let template = env.get_template(TEMPLATE_NAME)?;

    // Series go in as JSON; missing counts become `null` gaps.
    let ticks_json = serde_json::to_string(&log.ticks())?;
    let squirrel_json = serde_json::to_string(&log.series(Species::Squirrel))?;
    let hawk_json = serde_json::to_string(&log.series(Species::Hawk))?;

    let html = template.render(context! {
        scenario => scenario_name,
        ticks => summary.ticks,
        timestamp => chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        squirrel_trend => describe_trend(&summary.squirrel),
        hawk_trend => describe_trend(&summary.hawk),
        ticks_json => ticks_json,
        squirrel_json => squirrel_json,
        hawk_json => hawk_json,
    })?;

    Ok(html)
}

/// Write the population chart for `scenario_name` under `<output_dir>/charts/`.
///
/// Returns the path of the written page.
pub fn plot_population(
    scenario_name: &str,
    log: &PopulationLog,
    output_dir: &Path,
) -> ReportResult<PathBuf> {
    let charts_dir = output_dir.join("charts");
    fs::create_dir_all(&charts_dir)?;

    let html = render_population_chart(scenario_name, log)?;

    let path = charts_dir.join(format!("{}.html", slug(scenario_name)));
    let mut file = File::create(&path)?;
    file.write_all(html.as_bytes())?;

    info!("Chart generated: {}", path.display());
    Ok(path)
}

/// File-name-safe form of a scenario name: `"hawk dies"` -> `"hawk-dies"`.
pub fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "scenario".to_string()
    } else {
        slug.to_string()
    }
}
