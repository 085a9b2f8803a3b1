//! Accepted signatures for every rubric requirement, grouped by task.
//!
//! Patterns use `regex` syntax and run against comment-stripped source.
//! Console-output signals are only ever OR-ed with a static alternative.

use super::{RequirementDef, Signal};

// ─── TODO 1: object with accessors ──────────────────────────────────

const STUDENT_FIELDS: Signal = Signal::AllOf(&[
    Signal::Source(&[r"\b(firstName|firstname)\b"]),
    Signal::Source(&[r"\b(lastName|lastname)\b"]),
    Signal::Source(&[r"\bgpa\b"]),
]);

const FULL_NAME_GETTER: Signal = Signal::Source(&[
    r"\bget\s+fullName\s*\(",
    r"\bfullName\s*:\s*function\s*\(",
    r"\bfullName\s*\(\)\s*\{",
]);

const GPA_UPDATER: Signal = Signal::Source(&[
    r"\bset\s+gpa\s*\(",
    r"(?i)\bupdateGpa\s*\(",
    r"(?i)\bsetGpa\s*\(",
]);

const GPA_RANGE_CHECK: Signal = Signal::Source(&[
    r"(?i)\b(gpa|newGpa|value)\s*>=\s*0(\.0+)?\s*&&\s*(gpa|newGpa|value)\s*<=\s*4(\.0+)?",
    r"(?i)\b(gpa|newGpa|value)\s*<\s*0(\.0+)?\s*\|\|\s*(gpa|newGpa|value)\s*>\s*4(\.0+)?",
    r"(?i)\bMath\.max\s*\(\s*0(\.0+)?\s*,\s*Math\.min\s*\(\s*4(\.0+)?\s*,",
    r"(?i)\bthrow\b[\s\S]{0,80}\b(gpa|newGpa)\b",
]);

const STUDENT_OUTPUT: Signal = Signal::AnyOf(&[
    Signal::AllOf(&[
        Signal::Source(&[r"fullName\b"]),
        Signal::Source(&[r"console\.log\s*\("]),
    ]),
    Signal::Source(&[r"(?i)console\.log\s*\([\s\S]*\b(firstName|lastName|gpa|fullName)\b"]),
    Signal::Logs(r"(?i)gpa|fullname|first"),
]);

pub static OBJECT_ACCESSORS: &[RequirementDef] = &[
    RequirementDef {
        label: "Defines a Student-like object/class with firstName, lastName, gpa",
        hint: Some("Include firstName, lastName, and gpa fields."),
        signal: STUDENT_FIELDS,
    },
    RequirementDef {
        label: "Implements fullName getter/method returning \"firstName lastName\"",
        hint: Some("Add a getter (get fullName()) or method fullName() that combines names."),
        signal: FULL_NAME_GETTER,
    },
    RequirementDef {
        label: "Has a GPA updater (setter or updateGpa method)",
        hint: Some("Add a setter for gpa or a method like updateGpa(newGpa)."),
        signal: GPA_UPDATER,
    },
    RequirementDef {
        label: "Validates GPA range 0.0–4.0",
        hint: Some("Add checks for 0..4 (clamp or throw or conditional)."),
        signal: GPA_RANGE_CHECK,
    },
    RequirementDef {
        label: "Creates an instance and outputs attributes (including via fullName)",
        hint: Some("Create an instance and console.log fields (use fullName)."),
        signal: STUDENT_OUTPUT,
    },
];

// ─── TODO 2: object as map + for...in ───────────────────────────────

const MAP_OBJECT: Signal =
    Signal::Source(&[r"\b(const|let|var)\s+\w+\s*=\s*\{[\s\S]*?:[\s\S]*?\}"]);

const FOR_IN_LOOP: Signal =
    Signal::Source(&[r"\bfor\s*\(\s*(const|let|var)?\s*\w+\s+in\s+\w+\s*\)"]);

const KEY_VALUE_OUTPUT: Signal = Signal::AnyOf(&[
    Signal::Source(&[
        // concatenation
        r"console\.log\s*\([\s\S]*\+\s*[\s\S]*\)",
        // key, obj[key]
        r"console\.log\s*\(\s*\w+\s*,\s*\w+\s*\[\s*\w+\s*\]\s*\)",
        // template literal
        r"console\.log\s*\(\s*`\$\{\w+\}[\s\S]*\$\{\w+\[\w+\]\}.*`\s*\)",
    ]),
    Signal::Logs(":"),
]);

pub static MAP_ENUMERATION: &[RequirementDef] = &[
    RequirementDef {
        label: "Creates an object used as a key→value map",
        hint: Some("Declare an object literal with key: value pairs."),
        signal: MAP_OBJECT,
    },
    RequirementDef {
        label: "Iterates over the map using for...in",
        hint: Some("Loop over the keys with for (const key in obj)."),
        signal: FOR_IN_LOOP,
    },
    RequirementDef {
        label: "Displays key and value during iteration",
        hint: Some("Log both the key and its value (e.g., key + value)."),
        signal: KEY_VALUE_OUTPUT,
    },
];

// ─── TODO 3: string charAt + length ─────────────────────────────────

const STRING_VALUE: Signal =
    Signal::Source(&[r#"\b(new\s+String\s*\(|["'`][\s\S]*?["'`])"#]);

const CHAR_AT: Signal = Signal::Source(&[r"\.charAt\s*\(\s*\d+", r"\.charAt\s*\(\s*\w+"]);

const LENGTH: Signal = Signal::Source(&[r"\.length\b"]);

const STRING_OUTPUT: Signal = Signal::AnyOf(&[
    Signal::Source(&[r"(?i)console\.log\s*\([\s\S]*(charAt|length)"]),
    Signal::Logs(r"\b\d+\b"),
]);

pub static STRING_ACCESS: &[RequirementDef] = &[
    RequirementDef {
        label: "Creates a string (plain or new String)",
        hint: Some("Create a string literal or use new String(...)."),
        signal: STRING_VALUE,
    },
    RequirementDef {
        label: "Uses .charAt(index)",
        hint: Some("Read a character with str.charAt(index)."),
        signal: CHAR_AT,
    },
    RequirementDef {
        label: "Uses .length",
        hint: Some("Read the string size with str.length."),
        signal: LENGTH,
    },
    RequirementDef {
        label: "Outputs char(s) and length",
        hint: Some("console.log the character(s) and the length."),
        signal: STRING_OUTPUT,
    },
];

// ─── TODO 4: Date day/month/year ────────────────────────────────────

const NOW: Signal = Signal::Source(&[r"\bnew\s+Date\s*\(\s*\)", r"\bnew\s+Date\b"]);

const GET_DATE: Signal = Signal::Source(&[r"\.getDate\s*\(\s*\)"]);

const GET_MONTH: Signal = Signal::Source(&[r"\.getMonth\s*\(\s*\)"]);

const GET_FULL_YEAR: Signal = Signal::Source(&[r"\.getFullYear\s*\(\s*\)"]);

const DATE_OUTPUT: Signal = Signal::AnyOf(&[
    Signal::Source(&[r"console\.log\s*\([\s\S]*get(Date|Month|FullYear)"]),
    Signal::Logs(r"\b20\d{2}\b"),
]);

pub static CALENDAR: &[RequirementDef] = &[
    RequirementDef {
        label: "Creates a Date for current moment (new Date())",
        hint: Some("Create the current date with new Date()."),
        signal: NOW,
    },
    RequirementDef {
        label: "Uses getDate()",
        hint: Some("Read the day of the month with getDate()."),
        signal: GET_DATE,
    },
    RequirementDef {
        label: "Uses getMonth()",
        hint: Some("Read the (zero-based) month with getMonth()."),
        signal: GET_MONTH,
    },
    RequirementDef {
        label: "Uses getFullYear()",
        hint: Some("Read the four-digit year with getFullYear()."),
        signal: GET_FULL_YEAR,
    },
    RequirementDef {
        label: "Displays the day/month/year values",
        hint: Some("console.log the day, month and year."),
        signal: DATE_OUTPUT,
    },
];

// ─── TODO 5: array + spread min/max ─────────────────────────────────

const TEN_NUMBERS: Signal = Signal::Source(&[
    r"\[\s*-?\d+(\.\d+)?\s*(,\s*-?\d+(\.\d+)?\s*){9,}\]",
    r"\bArray\s*\(\s*10\s*\)",
    r"\bpush\s*\(",
]);

const MIN_SPREAD: Signal = Signal::Source(&[
    r"Math\.min\s*\(\s*\.\.\.\s*\w+",
    r"Math\.min\s*\(\s*\.\.\.\s*\[",
]);

const MAX_SPREAD: Signal = Signal::Source(&[
    r"Math\.max\s*\(\s*\.\.\.\s*\w+",
    r"Math\.max\s*\(\s*\.\.\.\s*\[",
]);

const MIN_MAX_OUTPUT: Signal = Signal::AnyOf(&[
    Signal::Source(&[r"console\.log\s*\([\s\S]*Math\.(min|max)"]),
    Signal::Logs(r"(?i)min|max"),
]);

pub static SPREAD_AGGREGATE: &[RequirementDef] = &[
    RequirementDef {
        label: "Declares an array with (about) 10 numbers",
        hint: Some("Use an array with 10 numeric values (any values)."),
        signal: TEN_NUMBERS,
    },
    RequirementDef {
        label: "Uses spread with Math.min(...)",
        hint: Some("Compute the minimum with Math.min(...numbers)."),
        signal: MIN_SPREAD,
    },
    RequirementDef {
        label: "Uses spread with Math.max(...)",
        hint: Some("Compute the maximum with Math.max(...numbers)."),
        signal: MAX_SPREAD,
    },
    RequirementDef {
        label: "Displays min and max",
        hint: Some("console.log both the minimum and the maximum."),
        signal: MIN_MAX_OUTPUT,
    },
];

// ─── TODO 6: try/catch/finally ──────────────────────────────────────

const TRY_CATCH_FINALLY: Signal = Signal::Source(&[
    r"\btry\s*\{[\s\S]*\}\s*catch\s*(\(\s*\w+\s*\))?\s*\{[\s\S]*\}\s*finally\s*\{[\s\S]*\}",
]);

const MAX_FUNCTION: Signal = Signal::AllOf(&[
    Signal::Source(&[
        r"\bfunction\s+\w+\s*\(\s*\w+\s*\)\s*\{[\s\S]*return[\s\S]*\}",
        r"\b(const|let|var)\s+\w+\s*=\s*(\(\s*\w+\s*\)|\w+)\s*=>\s*\{[\s\S]*return[\s\S]*\}",
    ]),
    Signal::Source(&[r"(?i)\b(Math\.max|reduce|for\s*\(|while\s*\(|if\s*\()"]),
]);

const EMPTY_GUARD: Signal = Signal::Source(&[
    r"(?i)if\s*\(\s*\w+\.length\s*===\s*0\s*\)\s*\{[\s\S]*throw",
    r"(?i)if\s*\(\s*!\s*\w+\.length\s*\)\s*\{[\s\S]*throw",
    r"(?i)throw\s+new\s+Error",
]);

const EMPTY_CALL: Signal = Signal::Source(&[r"\(\s*\[\s*\]\s*\)", r"\b\w+\s*=\s*\[\s*\]\s*;"]);

const FLOW_OUTPUT: Signal = Signal::AnyOf(&[
    Signal::Source(&[r"(?i)console\.log\s*\([\s\S]*(try|catch|finally)[\s\S]*\)"]),
    Signal::Logs(r"(?i)try|catch|finally"),
]);

pub static FAULT_HANDLING: &[RequirementDef] = &[
    RequirementDef {
        label: "Uses try/catch/finally blocks",
        hint: Some("Wrap the call in try { } catch (e) { } finally { }."),
        signal: TRY_CATCH_FINALLY,
    },
    RequirementDef {
        label: "Implements a function to return max element",
        hint: Some("Write a function that returns the largest element of an array."),
        signal: MAX_FUNCTION,
    },
    RequirementDef {
        label: "Handles empty array case by throwing/triggering an error",
        hint: Some("Throw an Error when the array is empty."),
        signal: EMPTY_GUARD,
    },
    RequirementDef {
        label: "Intentionally passes an empty array to trigger error",
        hint: Some("Call the function with [] to trigger the error."),
        signal: EMPTY_CALL,
    },
    RequirementDef {
        label: "Logs messages in try, catch, and finally",
        hint: Some("console.log a message in each of try, catch and finally."),
        signal: FLOW_OUTPUT,
    },
];

// ─── TODO 7: regex + forEach ────────────────────────────────────────

const WORD_LIST: Signal = Signal::Source(&[
    r#"(?i)\bwords\s*=\s*\[\s*["']ban["']\s*,\s*["']babble["']\s*,\s*["']make["']\s*,\s*["']flab["']\s*\]"#,
    r"\bconst\s+words\s*=\s*\[",
]);

const AB_PATTERN: Signal = Signal::Source(&[r"/ab/[gimsuy]*", r#"new\s+RegExp\s*\(\s*["']ab["']"#]);

const FOR_EACH: Signal = Signal::Source(&[r"\.forEach\s*\(\s*\(?\s*\w+"]);

const PATTERN_TEST: Signal = Signal::Source(&[r"\.test\s*\(\s*\w+\s*\)"]);

const MATCHES_OUTPUT: Signal = Signal::AnyOf(&[
    Signal::Source(&[
        r#"matches!\s*["'`]"#,
        r#"(?i)console\.log\s*\(\s*["'`][\s\S]*matches!"#,
    ]),
    Signal::Logs(r"(?i)matches!"),
]);

pub static PATTERN_SEARCH: &[RequirementDef] = &[
    RequirementDef {
        label: "Defines the words list (or equivalent)",
        hint: Some("Declare const words = [\"ban\", \"babble\", \"make\", \"flab\"]."),
        signal: WORD_LIST,
    },
    RequirementDef {
        label: "Creates a RegExp to detect 'ab' substring",
        hint: Some("Use a literal /ab/ or new RegExp(\"ab\")."),
        signal: AB_PATTERN,
    },
    RequirementDef {
        label: "Loops with forEach()",
        hint: Some("Iterate the words with words.forEach(word => ...)."),
        signal: FOR_EACH,
    },
    RequirementDef {
        label: "Uses pattern.test(word) (or equivalent) to check matches",
        hint: Some("Check each word with pattern.test(word)."),
        signal: PATTERN_TEST,
    },
    RequirementDef {
        label: "Logs \"<word> matches!\" for matches",
        hint: Some("console.log(`${word} matches!`) for each match."),
        signal: MATCHES_OUTPUT,
    },
];
