use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize)]
pub struct InputScalingInfo {
    pub display_name: &'static str,
    pub fault_tolerance: &'static str,
    pub recommendations: &'static [&'static str],
    pub critical_warnings: &'static [&'static str],
    pub suggest_alternative: bool,
    pub required_topics: &'static [&'static str],
    pub recommended_topics: &'static [&'static str],
}

static SCALING_KB: Lazy<HashMap<&'static str, InputScalingInfo>> = Lazy::new(|| {
    let mut kb = HashMap::new();
    kb.insert(
        "udp",
        InputScalingInfo {
            display_name: "UDP",
            fault_tolerance: "No delivery guarantee; datagrams are silently dropped when the \
                              listener or the kernel buffer is saturated.",
            recommendations: &[
                "Increase the kernel receive buffer (read_buffer) for high event rates",
                "Distribute senders across multiple agents behind a load balancer",
                "Monitor packet drop counters on the host",
            ],
            critical_warnings: &["UDP provides no acknowledgement; data loss under load is silent"],
            suggest_alternative: true,
            required_topics: &["data loss", "buffer"],
            recommended_topics: &["load balancer", "packet drop"],
        },
    );
    kb.insert(
        "tcp",
        InputScalingInfo {
            display_name: "TCP",
            fault_tolerance: "Connection-oriented with retransmission; backpressure propagates to \
                              the sender when the pipeline is saturated.",
            recommendations: &[
                "Tune max_connections for the expected number of senders",
                "Place a load balancer in front of multiple agents for horizontal scale",
            ],
            critical_warnings: &[],
            suggest_alternative: false,
            required_topics: &["connection"],
            recommended_topics: &["load balancer", "backpressure"],
        },
    );
    kb.insert(
        "filestream",
        InputScalingInfo {
            display_name: "Log file",
            fault_tolerance: "Read offsets are checkpointed in the registry; harvesting resumes \
                              after restart without loss as long as files are not rotated away.",
            recommendations: &[
                "Align log rotation retention with expected ingestion lag",
                "Use one agent per host; file harvesting does not fan out",
            ],
            critical_warnings: &[],
            suggest_alternative: false,
            required_topics: &["rotation"],
            recommended_topics: &["registry", "retention"],
        },
    );
    kb.insert(
        "httpjson",
        InputScalingInfo {
            display_name: "API / HTTP JSON",
            fault_tolerance: "Polling with cursor state; vendor-side rate limits bound throughput.",
            recommendations: &[
                "Respect the vendor API rate limits when lowering the poll interval",
                "Use a single agent per API credential to avoid duplicate polling",
            ],
            critical_warnings: &["Running multiple collectors with the same credentials duplicates events"],
            suggest_alternative: false,
            required_topics: &["rate limit", "interval"],
            recommended_topics: &["pagination", "cursor"],
        },
    );
    kb.insert(
        "http_endpoint",
        InputScalingInfo {
            display_name: "HTTP Endpoint",
            fault_tolerance: "Push-based; availability of the listener determines delivery, and \
                              sender retry behavior is vendor-specific.",
            recommendations: &[
                "Front the endpoint with a load balancer for high availability",
                "Enable TLS on the listener for production deployments",
            ],
            critical_warnings: &[],
            suggest_alternative: false,
            required_topics: &["availability"],
            recommended_topics: &["load balancer", "tls"],
        },
    );
    kb.insert(
        "aws-s3",
        InputScalingInfo {
            display_name: "AWS S3 / SQS",
            fault_tolerance: "SQS-notification based collection is at-least-once; unprocessed \
                              messages return to the queue after the visibility timeout.",
            recommendations: &[
                "Scale horizontally by adding agents polling the same SQS queue",
                "Set the SQS visibility timeout above the worst-case processing time",
            ],
            critical_warnings: &[],
            suggest_alternative: false,
            required_topics: &["sqs", "queue"],
            recommended_topics: &["visibility timeout", "horizontal"],
        },
    );
    kb.insert(
        "gcs",
        InputScalingInfo {
            display_name: "Google Cloud Storage",
            fault_tolerance: "Object polling with checkpointing; objects are not deleted by the \
                              collector, so reprocessing after failure is possible.",
            recommendations: &[
                "Tune the number of workers (max_workers) to the object arrival rate",
                "Prefer bucket notification setups for low-latency collection",
            ],
            critical_warnings: &[],
            suggest_alternative: false,
            required_topics: &["bucket"],
            recommended_topics: &["workers", "poll interval"],
        },
    );
    kb.insert(
        "azure-eventhub",
        InputScalingInfo {
            display_name: "Azure Event Hub",
            fault_tolerance: "Consumer-group offsets are stored in blob storage; partitions \
                              rebalance across collectors.",
            recommendations: &[
                "Match the number of agents to the Event Hub partition count",
                "Use a dedicated consumer group per integration",
            ],
            critical_warnings: &["Sharing a consumer group with other applications causes missed events"],
            suggest_alternative: false,
            required_topics: &["partition", "consumer group"],
            recommended_topics: &["checkpoint", "blob storage"],
        },
    );
    kb.insert(
        "cel",
        InputScalingInfo {
            display_name: "CEL",
            fault_tolerance: "Program-driven polling with persisted cursor state between runs.",
            recommendations: &[
                "Keep the CEL program idempotent so retries do not duplicate events",
                "Respect the vendor API rate limits in the program interval",
            ],
            critical_warnings: &[],
            suggest_alternative: false,
            required_topics: &["interval"],
            recommended_topics: &["rate limit", "cursor"],
        },
    );
    kb.insert(
        "winlog",
        InputScalingInfo {
            display_name: "Windows Event Log",
            fault_tolerance: "Bookmark-based resume per channel; events stay in the channel until \
                              rotation overwrites them.",
            recommendations: &[
                "Increase channel size for busy channels to extend the recovery window",
                "Collect only the channels the integration needs",
            ],
            critical_warnings: &[],
            suggest_alternative: false,
            required_topics: &["channel"],
            recommended_topics: &["bookmark", "rotation"],
        },
    );
    kb.insert(
        "journald",
        InputScalingInfo {
            display_name: "Journald",
            fault_tolerance: "Cursor-based resume against the systemd journal; retention follows \
                              journald configuration.",
            recommendations: &["Align journald retention with expected agent downtime"],
            critical_warnings: &[],
            suggest_alternative: false,
            required_topics: &["retention"],
            recommended_topics: &["cursor"],
        },
    );
    kb.insert(
        "netflow",
        InputScalingInfo {
            display_name: "NetFlow",
            fault_tolerance: "UDP-transported flow records; export bursts beyond the listener \
                              capacity are dropped without notice.",
            recommendations: &[
                "Increase the receive queue size (queue_size) for high flow rates",
                "Dedicate an agent to flow collection on busy networks",
            ],
            critical_warnings: &["Flow records arrive over UDP; sustained bursts cause silent data loss"],
            suggest_alternative: true,
            required_topics: &["data loss", "queue"],
            recommended_topics: &["sampling", "burst"],
        },
    );
    kb.insert(
        "redis",
        InputScalingInfo {
            display_name: "Redis",
            fault_tolerance: "Slowlog polling is stateless; entries that age out of the slowlog \
                              between polls are missed.",
            recommendations: &["Size slowlog-max-len above the event rate per poll interval"],
            critical_warnings: &[],
            suggest_alternative: false,
            required_topics: &["slowlog"],
            recommended_topics: &["interval"],
        },
    );
    kb.insert(
        "kafka",
        InputScalingInfo {
            display_name: "Kafka",
            fault_tolerance: "Consumer-group offsets committed to the broker; at-least-once \
                              delivery across rebalances.",
            recommendations: &[
                "Match consumer count to the topic partition count",
                "Use a dedicated consumer group for the integration",
            ],
            critical_warnings: &[],
            suggest_alternative: false,
            required_topics: &["partition", "consumer group"],
            recommended_topics: &["offset", "rebalance"],
        },
    );
    kb
});

pub fn scaling_info(input_type: &str) -> Option<&'static InputScalingInfo> {
    // logfile is the legacy alias for filestream
    let key = if input_type == "logfile" {
        "filestream"
    } else {
        input_type
    };
    SCALING_KB.get(key)
}

// Inputs whose reachability depends on host networking; docs for packages
// using them must cover network requirements.
pub fn is_network_sensitive(input_type: &str) -> bool {
    matches!(
        input_type,
        "udp" | "tcp" | "http_endpoint" | "netflow" | "syslog"
    )
}

pub fn known_input_types() -> impl Iterator<Item = &'static str> {
    SCALING_KB.keys().copied()
}
