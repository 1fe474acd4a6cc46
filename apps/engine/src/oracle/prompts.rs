// Oracle prompt templates. All prompts for the extraction, evaluation, and
// matching calls are defined here.

pub const EXTRACT_SYSTEM: &str = "\
You are a precise resume data extractor. \
Parse raw resume text into structured JSON. \
You MUST respond with valid JSON only — no markdown fences, no explanations. \
Use null for fields the resume does not state. \
Never invent placeholder values like 'Unknown' or 'Not Provided'.";

pub const EXTRACT_PROMPT: &str = r#"Extract the following resume text into a structured JSON object.

RESUME TEXT:
{resume_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "name": "string" | null,
  "email": "string" | null,
  "phone": "string" | null,
  "address": "string" | null,
  "summary": "string" | null,
  "experience": [
    {"company": "string" | null, "position": "string" | null,
     "duration": "string" | null, "responsibilities": ["string"]}
  ],
  "education": [
    {"institution": "string" | null, "degree": "string" | null,
     "dates": "string" | null, "gpa": "string" | null}
  ],
  "skills": {"technical": ["string"], "soft": ["string"]},
  "projects": [
    {"name": "string", "description": "string" | null, "technologies": ["string"]}
  ],
  "certifications": [
    {"name": "string", "issuer": "string" | null, "date": "string" | null}
  ],
  "languages": [{"language": "string", "proficiency": "string" | null}],
  "interests": ["string"]
}

RULES:
1. Copy values from the text verbatim; do not paraphrase names or titles.
2. Lists are empty arrays when the resume has no such section, never null.
3. Keep experience entries in the order they appear in the text.
4. Return ONLY the JSON object — nothing else, no code fences."#;

pub const EVALUATE_SYSTEM: &str = "\
You are an experienced technical recruiter evaluating resume quality. \
You MUST respond with valid JSON only — no markdown fences, no explanations. \
Scores are integers and must respect the stated caps.";

pub const EVALUATE_PROMPT: &str = r#"Evaluate the following structured resume profile.

PROFILE:
{profile_json}

OUTPUT SCHEMA (return exactly this structure):
{
  "overall_score": 0-100,
  "scores": {"ats": 0-30, "keyword": 0-30, "content": 0-20, "relevance": 0-20},
  "strengths": ["string"],
  "weaknesses": ["string"],
  "improvements": ["string"],
  "industry_specific": ["string"],
  "keyword_matches": ["string"],
  "personalization": ["string"]
}

RULES:
1. overall_score must equal the sum of the four sub-scores.
2. Ground every strength and weakness in the profile content.
3. Return ONLY the JSON object — nothing else, no code fences."#;

pub const MATCH_SYSTEM: &str = "\
You are an applicant tracking system comparing a candidate against a job \
description. You MUST respond with valid JSON only — no markdown fences, \
no explanations.";

pub const MATCH_PROMPT: &str = r#"Compare the candidate profile against the job description.

PROFILE:
{profile_json}

JOB DESCRIPTION:
{job_description}

OUTPUT SCHEMA (return exactly this structure):
{
  "match_percentage": 0-100,
  "matched": ["string"],
  "missing": ["string"],
  "total_job_keywords": 0,
  "recommendations": ["string"]
}

RULES:
1. matched/missing are keywords from the job description, lowercase.
2. Provide at least 3 recommendations.
3. Return ONLY the JSON object — nothing else, no code fences."#;
