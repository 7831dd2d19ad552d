use grc_diagnostic::workflows::diagnosis::{DiagnosisReport, ExecutiveNarrative, Question};
use std::io::{self, Write};

const BAR_WIDTH: usize = 20;

pub(crate) fn render_report<W: Write>(report: &DiagnosisReport, out: &mut W) -> io::Result<()> {
    let dashboard = &report.dashboard;

    writeln!(
        out,
        "Diagnóstico GRC | {} | {}",
        dashboard.company_name, dashboard.issued_on
    )?;
    writeln!(
        out,
        "Score GRC Total: {:.2} ({})",
        dashboard.total_score, dashboard.status.label
    )?;

    writeln!(out, "\nMapa de calor (gap vs benchmark)")?;
    for cell in &dashboard.heatmap {
        let filled = ((cell.bar_pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        writeln!(
            out,
            "  {:<24} {:>7.2}  {:<6} [{}{}]",
            cell.label,
            cell.gap,
            cell.level.label(),
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH.saturating_sub(filled)),
        )?;
    }

    writeln!(out, "\nPrioridades")?;
    for entry in &dashboard.priorities {
        writeln!(
            out,
            "  {}. {} (gap {:.2}): {}",
            entry.rank, entry.label, entry.gap, entry.description
        )?;
        for action in &entry.actions {
            writeln!(out, "     - {action}")?;
        }
    }

    let offer = &dashboard.commercial;
    writeln!(
        out,
        "\nOferta recomendada [{}]: {} -> {}",
        offer.situation, offer.offer, offer.call_to_action
    )?;

    writeln!(out, "\nComparativo")?;
    for row in &dashboard.comparison {
        writeln!(
            out,
            "  {:<24} {:>7.2}  benchmark {:>3.0}",
            row.label, row.score, row.benchmark
        )?;
    }

    if let Some(narrative) = &report.narrative {
        render_narrative(narrative, out)?;
    }

    Ok(())
}

pub(crate) fn render_narrative<W: Write>(
    narrative: &ExecutiveNarrative,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "\nAnálise executiva")?;
    for paragraph in &narrative.paragraphs {
        writeln!(out, "  {paragraph}")?;
    }
    Ok(())
}

pub(crate) fn render_question<W: Write>(
    question: &Question,
    position: usize,
    total: usize,
    current: Option<u8>,
    out: &mut W,
) -> io::Result<()> {
    let progress = (position as f64 / total as f64) * 100.0;
    writeln!(
        out,
        "\n[{position}/{total} | {progress:.0}%] {} ({})",
        question.text, question.primary_pillar
    )?;
    for option in &question.options {
        let marker = if current == Some(option.value) { '*' } else { ' ' };
        writeln!(out, "  {marker}{}) {}", option.value, option.label)?;
    }
    if let Some(label) = current.and_then(|value| question.option_label(value)) {
        writeln!(out, "  Resposta atual: {label}")?;
    }
    Ok(())
}
