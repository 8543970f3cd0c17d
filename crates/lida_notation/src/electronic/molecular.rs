//! Molecular term symbols: `X(2Π)`, `1Σ-`, `A(3Σ+g)`, `2Π_3/2`.

use lida_foundation::Result;

use super::{ElectronicLabel, HalfInt, Notation, TermParser};

/// Λ symbols with their ASCII spellings and |Λ| values.
const LAMBDAS: [(&str, char, u32); 5] = [
    ("SIGMA", 'Σ', 0),
    ("PI", 'Π', 1),
    ("DELTA", 'Δ', 2),
    ("PHI", 'Φ', 3),
    ("GAMMA", 'Γ', 4),
];

pub(super) fn matches(input: &str) -> bool {
    if LAMBDAS.iter().any(|&(_, symbol, _)| input.contains(symbol)) {
        return true;
    }
    input.char_indices().any(|(i, c)| {
        c.is_ascii_digit()
            && LAMBDAS
                .iter()
                .any(|&(name, _, _)| input[i + 1..].starts_with(name))
    })
}

struct Term {
    label: Option<String>,
    multiplicity: u32,
    symbol: char,
    lambda: u32,
    reflection: Option<char>,
    parity: Option<char>,
    omega: Option<HalfInt>,
}

pub(super) fn parse(input: &str) -> Result<ElectronicLabel> {
    let mut p = TermParser::new(input, Notation::MolecularTerm);

    let label = if input.contains('(') {
        let label = term_label(&mut p)?;
        p.expect('(')?;
        Some(label)
    } else {
        None
    };

    let multiplicity = p.positive("multiplicity")?;
    let (symbol, lambda) = lambda(&mut p)?;

    let mut reflection = None;
    let mut parity = None;
    while let Some(c) = p.cursor.peek() {
        match c {
            '+' | '-' if reflection.is_none() => {
                if lambda != 0 {
                    return Err(p.error("reflection symmetry only applies to Σ terms"));
                }
                p.cursor.bump();
                reflection = Some(c);
            }
            'g' | 'u' if parity.is_none() => {
                p.cursor.bump();
                parity = Some(c);
            }
            _ => break,
        }
    }

    let omega = p.optional_j("Ω")?;

    if label.is_some() {
        p.expect(')')?;
    }
    p.expect_end()?;

    let term = Term {
        label,
        multiplicity,
        symbol,
        lambda,
        reflection,
        parity,
        omega,
    };
    if let Some(omega) = term.omega {
        if !omega_allowed(term.lambda, term.multiplicity, omega) {
            return Err(p.invalid(format!(
                "Ω={omega} is not reachable from Λ={} with multiplicity {}",
                term.lambda, term.multiplicity
            )));
        }
    }

    Ok(ElectronicLabel::new(
        canonical(&term),
        html(&term),
        Notation::MolecularTerm,
    ))
}

/// One letter optionally followed by primes (`X`, `b'`, `A''`).
fn term_label(p: &mut TermParser<'_>) -> Result<String> {
    let Some(first) = p.cursor.peek().filter(char::is_ascii_alphabetic) else {
        return Err(p.error("expected term label"));
    };
    p.cursor.bump();
    let mut label = first.to_string();
    while let Some(c) = p.cursor.peek() {
        match c {
            '\'' | '′' => {
                p.cursor.bump();
                label.push('\'');
            }
            _ => break,
        }
    }
    Ok(label)
}

fn lambda(p: &mut TermParser<'_>) -> Result<(char, u32)> {
    for &(name, symbol, value) in &LAMBDAS {
        if p.cursor.eat(symbol) || p.cursor.eat_str(name) {
            return Ok((symbol, value));
        }
    }
    Err(p.error("expected one of Σ Π Δ Φ Γ"))
}

/// Ω must equal |Λ + Σ| for some Σ in -S..=S.
fn omega_allowed(lambda: u32, multiplicity: u32, omega: HalfInt) -> bool {
    let twice_lambda = i64::from(lambda) * 2;
    let twice_s = i64::from(multiplicity) - 1;
    let twice_omega = i64::from(omega.twice());
    [twice_omega - twice_lambda, -twice_omega - twice_lambda]
        .into_iter()
        .any(|sigma| sigma.abs() <= twice_s && (sigma + twice_s) % 2 == 0)
}

fn core(term: &Term) -> String {
    let mut core = format!("{}{}", term.multiplicity, term.symbol);
    if let Some(r) = term.reflection {
        core.push(r);
    }
    if let Some(g) = term.parity {
        core.push(g);
    }
    if let Some(omega) = term.omega {
        core.push_str(&format!("_{omega}"));
    }
    core
}

fn canonical(term: &Term) -> String {
    match &term.label {
        Some(label) => format!("{label}({})", core(term)),
        None => core(term),
    }
}

fn html(term: &Term) -> String {
    let mut html = term.label.clone().unwrap_or_default();
    html.push_str(&format!("<sup>{}</sup>{}", term.multiplicity, term.symbol));
    if let Some(r) = term.reflection {
        html.push_str(&format!("<sup>{r}</sup>"));
    }
    let subscript = match (term.omega, term.parity) {
        (Some(omega), Some(g)) => Some(format!("{omega},{g}")),
        (Some(omega), None) => Some(omega.to_string()),
        (None, Some(g)) => Some(g.to_string()),
        (None, None) => None,
    };
    if let Some(sub) = subscript {
        html.push_str(&format!("<sub>{sub}</sub>"));
    }
    html
}
