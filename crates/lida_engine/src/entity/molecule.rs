//! Molecules: formula-keyed chemical species.

use lida_foundation::{
    AttrChange, AttrValue, EntityKind, Error, ErrorContext, MoleculeId, Result,
};
use lida_notation::Formula;
use lida_storage::{IsotopologueKey, MoleculeKey, MoleculeRecord, Store, TransitionRecord};

use crate::catalog::Catalog;
use crate::derivation::{Derivation, Derived, SyncContext, derivation};
use crate::sync::Selection;

fn formula(m: &MoleculeRecord) -> Result<Formula> {
    Formula::parse(&m.formula)
}

fn slug(m: &MoleculeRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(formula(m)?.slug().into())
}

fn html(m: &MoleculeRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(formula(m)?.html().into())
}

fn charge(m: &MoleculeRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(i64::from(formula(m)?.charge()).into())
}

fn number_atoms(m: &MoleculeRecord, _: &SyncContext<'_>) -> Result<AttrValue> {
    Ok(u64::from(formula(m)?.number_atoms()).into())
}

impl Derived for MoleculeRecord {
    const DERIVATIONS: &'static [Derivation<Self>] = &[
        derivation!(slug: Text = slug),
        derivation!(html: Text = html),
        derivation!(charge: Int = charge),
        derivation!(number_atoms: Count = number_atoms),
    ];

    fn describe(&self, _: &dyn Store) -> Result<String> {
        Ok(self.formula.clone())
    }
}

/// Parses `input` and insists it is already canonical.
pub(crate) fn canonical_formula(input: &str) -> Result<Formula> {
    let parsed = Formula::parse(input)?;
    let canonical = parsed.canonical();
    if canonical != input {
        return Err(Error::grammar(
            "formula",
            input,
            format!("not canonical, expected {canonical:?}"),
        ));
    }
    Ok(parsed)
}

impl<S: Store> Catalog<S> {
    /// Creates a molecule from a canonical formula such as `"CO2+"`.
    ///
    /// # Errors
    ///
    /// Returns `GrammarParse` for a malformed or non-canonical formula and
    /// `DuplicateEntity` if the formula is taken.
    pub fn create_molecule(&mut self, formula: &str, name: &str) -> Result<MoleculeId> {
        let context = ErrorContext::new().with_operation("create_molecule");
        self.atomic(context, |catalog| {
            canonical_formula(formula)?;
            let key = MoleculeKey(formula.to_string());
            if catalog.store().molecules().find(&key).is_some() {
                return Err(Error::duplicate(EntityKind::Molecule, formula));
            }
            let mut record = MoleculeRecord::new(formula, name);
            catalog.sync(&mut record, &Selection::All)?;
            catalog.insert(record)
        })
    }

    /// Loads a molecule.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn molecule(&self, id: MoleculeId) -> Result<MoleculeRecord> {
        self.load(id)
    }

    /// Looks a molecule up by its canonical formula.
    #[must_use]
    pub fn molecule_by_formula(&self, formula: &str) -> Option<MoleculeRecord> {
        self.store()
            .molecules()
            .find(&MoleculeKey(formula.to_string()))
    }

    /// Changes a molecule's formula and re-derives everything that renders it:
    /// the molecule's own caches and the markup of its transitions.
    ///
    /// Administrative; returns the molecule's own changes.
    ///
    /// # Errors
    ///
    /// Returns `GrammarParse` for a non-canonical formula, `DuplicateEntity`
    /// if it is taken, and `DimensionMismatch` if the new atom count no longer
    /// supports the isotopologue's vibrational dimensionality.
    pub fn update_molecule_formula(
        &mut self,
        id: MoleculeId,
        formula: &str,
    ) -> Result<Vec<AttrChange>> {
        let context = ErrorContext::new()
            .with_operation("update_molecule_formula")
            .with_entity(id);
        self.atomic(context, |catalog| {
            let parsed = canonical_formula(formula)?;
            let mut record = catalog.molecule(id)?;
            if let Some(holder) = catalog.molecule_by_formula(formula) {
                if holder.id != id {
                    return Err(Error::duplicate(EntityKind::Molecule, formula));
                }
            }

            let isotopologue = catalog
                .store()
                .isotopologues()
                .find(&IsotopologueKey::Molecule(id));
            if let Some(iso) = &isotopologue {
                let modes = catalog.config().vibrational_modes;
                if let Some(limit) = modes.max_dimension(u64::from(parsed.number_atoms())) {
                    if iso.vib_state_dim > limit {
                        return Err(Error::dimension_mismatch(
                            formula,
                            limit,
                            iso.vib_state_dim,
                            modes.rule(),
                        ));
                    }
                }
            }

            record.formula = formula.to_string();
            let changes = catalog.sync(&mut record, &Selection::All)?;
            catalog.commit(record)?;

            if let Some(iso) = isotopologue {
                let transitions = catalog
                    .store()
                    .transitions()
                    .filter(&|t| t.isotopologue == iso.id);
                let only_html = Selection::only(["html"]);
                for transition in transitions {
                    catalog.resync::<TransitionRecord>(transition.id, &only_html)?;
                }
            }
            Ok(changes)
        })
    }

    /// Deletes a molecule together with its isotopologue, states and
    /// transitions.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn delete_molecule(&mut self, id: MoleculeId) -> Result<MoleculeRecord> {
        let context = ErrorContext::new()
            .with_operation("delete_molecule")
            .with_entity(id);
        self.atomic(context, |catalog| {
            catalog.molecule(id)?;
            if let Some(iso) = catalog
                .store()
                .isotopologues()
                .find(&IsotopologueKey::Molecule(id))
            {
                catalog.remove_isotopologue(iso.id)?;
            }
            catalog.store_mut().molecules_mut().delete(id)
        })
    }
}
