//! Embedded default prompt templates.
//!
//! Placeholders are `{{variable}}`. Each template returns a JSON object so
//! it works with the provider's JSON-object output mode.

pub(super) const BRAIN_NUTRIENT_SYSTEM: &str = "\
You are a nutritional biochemist building a nutritional psychiatry database. \
Estimate brain-relevant nutrient content per 100 g of edible portion using \
food composition science, known values for similar foods and the measured \
nutrients provided. Respond with a single JSON object only.";

pub(super) const BRAIN_NUTRIENT_USER: &str = "\
Food: {{food_name}} (category: {{food_category}})

Measured standard nutrients per 100 g:
{{standard_nutrients_json}}

Brain nutrients already known (do not contradict these):
{{existing_brain_nutrients_json}}

Predict these nutrients: {{target_nutrients_list}}

Scientific context: {{scientific_context}}
Reference foods with known values: {{reference_foods_json}}

Return a flat JSON object. Use keys such as tryptophan_mg, tyrosine_mg, \
vitamin_b6_mg, folate_mcg, vitamin_b12_mcg, vitamin_d_mcg, magnesium_mg, \
zinc_mg, iron_mg, selenium_mcg, choline_mg, omega3_total_g, omega3_epa_mg, \
omega3_dha_mg, omega3_ala_mg. For every predicted key add confidence_<key> \
between 0 and 1, and add a short \"reasoning\" string.";

pub(super) const BIOACTIVE_SYSTEM: &str = "\
You are a phytochemistry expert estimating bioactive compound content of \
foods for a nutritional psychiatry database. Respond with a single JSON \
object only.";

pub(super) const BIOACTIVE_USER: &str = "\
Food: {{food_name}} (category: {{food_category}})
Processing method: {{processing_method}}

Measured standard nutrients per 100 g:
{{standard_nutrients_json}}

Scientific context: {{scientific_context}}
Additional compounds of interest: {{additional_compounds}}

Return a flat JSON object mapping each compound name (e.g. polyphenols_mg, \
flavonoids_mg, anthocyanins_mg, carotenoids_mg, probiotics_cfu) to its \
estimated amount per 100 g, a confidence_<compound> value between 0 and 1 \
for each, and a short \"reasoning\" string.";

pub(super) const IMPACTS_SYSTEM: &str = "\
You are a nutritional psychiatry researcher summarizing evidence linking \
foods and their nutrients to mental-health outcomes. Only report \
relationships supported by published research. Respond with a single JSON \
object only.";

pub(super) const IMPACTS_USER: &str = "\
Food: {{food_name}} (category: {{food_category}})

Standard nutrients: {{standard_nutrients}}
Brain nutrients: {{brain_nutrients}}
Bioactive compounds: {{bioactive_compounds}}

Scientific context: {{scientific_context}}

List at most {{max_impacts}} mental-health impacts as \
{\"mental_health_impacts\": [...]}. Each entry has impact_type, direction \
(positive, negative or neutral), mechanism, strength (1-10), confidence \
(0-1), time_to_effect, research_context, research_support (list of \
{citation, doi, study_type, year}) and notes.";

pub(super) const MECHANISM_SYSTEM: &str = "\
You are a neuroscientist explaining mechanisms of action between nutrients \
and brain function. Respond with a single JSON object only.";

pub(super) const MECHANISM_USER: &str = "\
Food: {{food_name}}
Nutrient: {{nutrient}}
Mental-health impact: {{impact}}

Scientific context: {{scientific_context}}

Describe the mechanism as a JSON object with primary_pathway (string), \
detailed_steps (list of strings), key_molecules (list of strings), \
brain_regions (list of strings) and confidence (0-1).";

pub(super) const CALIBRATION_SYSTEM: &str = "\
You are a scientific reviewer calibrating confidence scores on AI-generated \
nutrition data. Lower confidence where evidence is thin, raise it only \
where reference data agrees. Respond with a single JSON object only.";

pub(super) const CALIBRATION_USER: &str = "\
Food: {{food_name}}
Data type: {{data_type}}

Generated data:
{{generated_data_json}}

Reference data: {{reference_data_json}}

Return the generated data unchanged in structure, with every confidence \
value recalibrated.";
